//! Host operations: built-ins that finish later.
//!
//! Each one validates its arguments, registers its callback, starts the
//! work on a helper thread and returns `?` at once. The helper reports back
//! through a [`CompletionSender`]; failures still complete, delivering an
//! error object to the callback.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use super::arg;
use crate::errors::{type_mismatch, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::scheduler::{CompletionSender, HostValue, OperationId};
use crate::value::Value;

pub(super) fn register(interpreter: &mut Interpreter) -> Result<(), EvalError> {
    interpreter.register_native("wait", builtin_wait)?;
    interpreter.register_native("readFile", builtin_read_file)?;
    interpreter.register_native("writeFile", builtin_write_file)?;
    Ok(())
}

/// `wait(seconds, cb)`: `cb(?)` once `seconds` have elapsed.
fn builtin_wait(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let seconds = match arg(args, 0).as_f64() {
        Some(s) if s.is_finite() => s.max(0.0),
        Some(_) => return Err(type_mismatch("wait", "finite number", "float")),
        None => return Err(type_mismatch("wait", "number", arg(args, 0).type_name())),
    };
    let callback = callback(args, 1, "wait")?;
    let operation = interp.register_operation(callback);
    spawn_host(interp.completion_sender(), operation, move || {
        thread::sleep(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX));
        Ok(HostValue::Null)
    });
    Ok(Value::Null)
}

/// `readFile(path, cb)`: `cb(contents)` or `cb({type: :error, message})`.
fn builtin_read_file(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let path = path_arg(interp, args, "readFile")?;
    let callback = callback(args, 1, "readFile")?;
    let operation = interp.register_operation(callback);
    spawn_host(interp.completion_sender(), operation, move || {
        std::fs::read(&path)
            .map(HostValue::Str)
            .map_err(|err| format!("cannot read {}: {err}", path.display()))
    });
    Ok(Value::Null)
}

/// `writeFile(path, data, cb)`: `cb(true)` or `cb({type: :error, message})`.
fn builtin_write_file(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let path = path_arg(interp, args, "writeFile")?;
    let data = match arg(args, 1) {
        Value::Str(h) => interp.heap.str(h)?.to_vec(),
        other => return Err(type_mismatch("writeFile", "string", other.type_name())),
    };
    let callback = callback(args, 2, "writeFile")?;
    let operation = interp.register_operation(callback);
    spawn_host(interp.completion_sender(), operation, move || {
        std::fs::write(&path, data)
            .map(|()| HostValue::Bool(true))
            .map_err(|err| format!("cannot write {}: {err}", path.display()))
    });
    Ok(Value::Null)
}

fn callback(args: &[Value], i: usize, operation: &str) -> Result<Value, EvalError> {
    let value = arg(args, i);
    if value.is_callable() {
        Ok(value)
    } else {
        Err(type_mismatch(operation, "callback function", value.type_name()))
    }
}

fn path_arg(interp: &Interpreter, args: &[Value], operation: &str) -> Result<PathBuf, EvalError> {
    match arg(args, 0) {
        Value::Str(h) => Ok(PathBuf::from(
            String::from_utf8_lossy(interp.heap.str(h)?).into_owned(),
        )),
        other => Err(type_mismatch(operation, "string path", other.type_name())),
    }
}

/// Run `work` on a detached helper thread and report its outcome.
///
/// If the thread cannot be started the operation fails immediately, so its
/// callback still runs.
fn spawn_host(
    sender: CompletionSender,
    operation: OperationId,
    work: impl FnOnce() -> Result<HostValue, String> + Send + 'static,
) {
    let on_spawn_error = sender.clone();
    let spawned = thread::Builder::new()
        .name("oak-io".to_string())
        .spawn(move || match work() {
            Ok(value) => sender.complete(operation, value),
            Err(message) => sender.fail(operation, message),
        });
    if let Err(err) = spawned {
        on_spawn_error.fail(operation, format!("cannot start host thread: {err}"));
    }
}
