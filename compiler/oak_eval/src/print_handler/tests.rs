#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_println_appends_newline() {
    let handler = buffer_handler();
    handler.println(b"hello");
    assert_eq!(handler.output(), "hello\n");
}

#[test]
fn buffer_handler_print_and_println_interleave() {
    let handler = buffer_handler();
    handler.print(b"Fizz");
    handler.print(b"Buzz");
    handler.println(b"!");
    assert_eq!(handler.output(), "FizzBuzz!\n");
}

#[test]
fn buffer_handler_keeps_raw_bytes() {
    let handler = BufferPrintHandler::new();
    handler.write(&[0xff, b'a'], false);
    assert_eq!(handler.output(), "\u{fffd}a");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println(b"hello");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn silent_handler_discards_output() {
    let handler = silent_handler();
    handler.println(b"hello");
    handler.print(b"world");
    assert_eq!(handler.output(), "");
}

#[test]
fn buffer_handler_is_shared_across_threads() {
    let handler = buffer_handler();
    let writer = handler.clone();

    let thread = std::thread::spawn(move || {
        for _ in 0..50 {
            writer.println(b"a");
        }
    });
    for _ in 0..50 {
        handler.println(b"b");
    }
    thread.join().unwrap();

    assert_eq!(handler.output().lines().count(), 100);
}
