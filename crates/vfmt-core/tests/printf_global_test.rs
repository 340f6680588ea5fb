//! Integration tests for the `printf` family over the global registry.
//!
//! Validates:
//! - initialize/cleanup lifecycle of the process-wide registry
//! - C-style status returns (`-1` sentinel) from `fprintf`
//! - global extension registration and error hook replacement
//! - handlers that re-enter the registry from inside a call never block
//!
//! Every test takes `TEST_LOCK`: the registry and hook are process-wide.
//!
//! Run: cargo test -p vfmt-core --test printf_global_test

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use vfmt_core::registry::handler_fn;
use vfmt_core::stdio::printf::global_registry;
use vfmt_core::{
    ArgCursor, ErrorHook, FatalAction, FormatArg, FormatError, cleanup_printf,
    clear_error_handler, fprintf, global_error_hook, initialize_printf, printf,
    register_error_handler, register_specifier, sprintf, vfprintf,
};

/// Run `sprintf(template)` on a worker thread and wait a bounded time for it.
fn sprintf_on_worker(template: &'static [u8]) -> Result<Vec<u8>, FormatError> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(sprintf(template, &[]));
    });
    rx.recv_timeout(Duration::from_secs(5))
        .unwrap_or_else(|_| panic!("sprintf({template:?}) did not return"))
}

static TEST_LOCK: Mutex<()> = Mutex::new(());

fn lock() -> std::sync::MutexGuard<'static, ()> {
    let guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    // Keep fatal errors from exiting the test process.
    register_error_handler(Arc::new(|_: &FormatError| FatalAction::Return));
    guard
}

#[test]
fn formats_after_initialize() {
    let _guard = lock();
    initialize_printf().unwrap();
    let out = sprintf(b"Integer: %d\n", &[FormatArg::Int(123)]).unwrap();
    assert_eq!(out, b"Integer: 123\n");
}

#[test]
fn initialize_is_idempotent() {
    let _guard = lock();
    initialize_printf().unwrap();
    register_specifier(b'W', handler_fn(|_, _, out| out.append(b"w"))).unwrap();
    initialize_printf().unwrap();
    assert_eq!(sprintf(b"%W", &[]).unwrap(), b"w");
    cleanup_printf().unwrap();
}

#[test]
fn cleanup_disables_every_directive() {
    let _guard = lock();
    initialize_printf().unwrap();
    cleanup_printf().unwrap();
    assert!(!global_registry().is_initialized());
    assert_eq!(sprintf(b"%d%%", &[FormatArg::Int(1)]).unwrap(), b"%d%");
    assert!(matches!(
        register_specifier(b'W', handler_fn(|_, _, _| Ok(()))),
        Err(FormatError::RegistryNotInitialized)
    ));
    initialize_printf().unwrap();
    assert_eq!(global_registry().directives(), b"RXbcdiopsx");
}

#[test]
fn fprintf_returns_count_or_sentinel() {
    let _guard = lock();
    initialize_printf().unwrap();
    let mut sink = Vec::new();
    assert_eq!(fprintf(&mut sink, b"Hex: %x", &[FormatArg::UInt(255)]), 7);
    assert_eq!(sink, b"Hex: ff");

    let mut sink = Vec::new();
    assert_eq!(fprintf(&mut sink, b"%s", &[]), -1);
    assert!(sink.is_empty());
}

#[test]
fn printf_writes_to_stdout() {
    let _guard = lock();
    initialize_printf().unwrap();
    assert_eq!(printf(b"", &[]), 0);
    assert_eq!(printf(b"vfmt %s\n", &[FormatArg::str("ok")]), 8);
}

#[test]
fn vfprintf_advances_shared_cursor() {
    let _guard = lock();
    initialize_printf().unwrap();
    let args = [FormatArg::Char(b'x'), FormatArg::Int(-2)];
    let mut cursor = ArgCursor::new(&args);
    let mut sink = Vec::new();
    vfprintf(&mut sink, b"%c", &mut cursor).unwrap();
    vfprintf(&mut sink, b"%d", &mut cursor).unwrap();
    assert_eq!(sink, b"x-2");
    assert_eq!(cursor.remaining(), 0);
}

#[test]
fn registered_hook_is_the_global_hook() {
    let _guard = lock();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    register_error_handler(Arc::new(move |_: &FormatError| {
        counter.fetch_add(1, Ordering::SeqCst);
        FatalAction::Return
    }));
    let err = FormatError::Allocation { requested: 1 };
    assert_eq!(global_error_hook().on_fatal(&err), FatalAction::Return);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert!(clear_error_handler().is_some());
    assert!(clear_error_handler().is_none());
}

#[test]
fn handler_registering_a_directive_gets_busy_instead_of_blocking() {
    let _guard = lock();
    initialize_printf().unwrap();
    register_specifier(
        b'L',
        handler_fn(|_, _, out| {
            match register_specifier(b'M', handler_fn(|_, _, _| Ok(()))) {
                Err(FormatError::RegistryBusy) => out.append(b"busy"),
                Err(other) => Err(other),
                Ok(_) => out.append(b"registered"),
            }
        }),
    )
    .unwrap();

    assert_eq!(sprintf_on_worker(b"[%L]").unwrap(), b"[busy]");
    assert!(global_registry().lookup(b'M').is_none());
    cleanup_printf().unwrap();
}

#[test]
fn handler_may_format_through_the_global_layer() {
    let _guard = lock();
    initialize_printf().unwrap();
    register_specifier(
        b'N',
        handler_fn(|directive, args, out| {
            let v = args.next_signed(directive)?;
            let inner = sprintf(b"<%x>", &[FormatArg::Int(v)])?;
            out.append(&inner)
        }),
    )
    .unwrap();

    let args = [FormatArg::Int(255)];
    let mut sink = Vec::new();
    vfprintf(&mut sink, b"n=%N", &mut ArgCursor::new(&args)).unwrap();
    assert_eq!(sink, b"n=<ff>");
    cleanup_printf().unwrap();
}

#[test]
fn cleanup_waits_out_then_rejects_a_long_call() {
    let _guard = lock();
    initialize_printf().unwrap();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let entered_tx = Mutex::new(entered_tx);
    let release_rx = Mutex::new(release_rx);
    register_specifier(
        b'H',
        handler_fn(move |_, _, out| {
            let _ = entered_tx.lock().unwrap().send(());
            let _ = release_rx.lock().unwrap().recv_timeout(Duration::from_secs(5));
            out.append(b"held")
        }),
    )
    .unwrap();

    let worker = thread::spawn(|| sprintf(b"%H", &[]));
    entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(matches!(cleanup_printf(), Err(FormatError::RegistryBusy)));
    release_tx.send(()).unwrap();
    assert_eq!(worker.join().unwrap().unwrap(), b"held");

    cleanup_printf().unwrap();
    assert!(!global_registry().is_initialized());
}
