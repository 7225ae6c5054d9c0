//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use oak_ir::SharedInterner;
use tracing::warn;

use super::{Interpreter, TypeNames};
use crate::builtins::register_prelude;
use crate::config::InterpreterConfig;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::scheduler::Scheduler;
use crate::value::Heap;

/// Builder for creating Interpreter instances.
///
/// Defaults: [`InterpreterConfig::default`], stdout output, a fresh
/// interner and the built-in library.
pub struct InterpreterBuilder {
    config: InterpreterConfig,
    print_handler: Option<SharedPrintHandler>,
    interner: Option<SharedInterner>,
    prelude: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            config: InterpreterConfig::default(),
            print_handler: None,
            interner: None,
            prelude: true,
        }
    }

    /// Set call depth and collection limits.
    #[must_use]
    pub fn config(mut self, config: InterpreterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set where `print` and `println` write.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Share an interner with the parser.
    ///
    /// Programs passed to [`Interpreter::eval_program`] must be parsed with
    /// this interner, or their names will not resolve.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Start with an empty root scope.
    #[must_use]
    pub fn without_prelude(mut self) -> Self {
        self.prelude = false;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();
        let mut heap = Heap::new(self.config.gc_threshold);
        let root = heap.new_scope(None);
        let type_names = TypeNames::new(&interner);

        let mut interpreter = Interpreter {
            heap,
            interner,
            root,
            natives: Vec::new(),
            scheduler: Scheduler::new(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            config: self.config,
            type_names,
            call_depth: 0,
        };
        if self.prelude {
            if let Err(err) = register_prelude(&mut interpreter) {
                warn!(error = %err, "failed to register built-ins");
            }
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
