/*!
 * Signal Collection Tests
 * End-to-end collection through real OS dispositions
 */

#![cfg(unix)]

use pretty_assertions::assert_eq;
use runtime_signals::signals::*;
use runtime_signals::SignalError;
use serial_test::serial;
use std::thread;
use std::time::{Duration, Instant};

fn number(identity: SignalIdentity) -> SignalNumber {
    resolve(identity).expect("identity is available on unix")
}

/// Empty the process-wide record left behind by earlier tests
fn reset() {
    drain_pending().for_each(drop);
}

fn wait_until_pending(timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if has_pending() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    has_pending()
}

#[test]
#[serial]
fn test_collect_raise_poll_round_trip() {
    reset();
    let usr1 = number(SignalIdentity::User1);
    let _guard = CollectionGuard::new(usr1).unwrap();

    raise_in_self(usr1).unwrap();

    assert_eq!(poll_next(), Some(usr1));
    assert_eq!(poll_next(), None);
}

#[test]
#[serial]
fn test_repeated_raises_coalesce() {
    reset();
    let usr2 = number(SignalIdentity::User2);
    let _guard = CollectionGuard::new(usr2).unwrap();

    for _ in 0..5 {
        raise_in_self(usr2).unwrap();
    }

    assert_eq!(drain_pending().collect::<Vec<_>>(), vec![usr2]);
}

#[test]
#[serial]
fn test_lowest_number_drains_first() {
    reset();
    let interrupt = number(SignalIdentity::Interrupt);
    let fpe = number(SignalIdentity::FloatingPoint);
    assert_eq!((interrupt.raw(), fpe.raw()), (2, 8));

    let _int_guard = CollectionGuard::new(interrupt).unwrap();
    let _fpe_guard = CollectionGuard::new(fpe).unwrap();

    raise_in_self(fpe).unwrap();
    raise_in_self(interrupt).unwrap();

    assert_eq!(poll_next_raw(), 2);
    assert_eq!(poll_next_raw(), 8);
    assert_eq!(poll_next_raw(), NONE_PENDING);
}

#[test]
#[serial]
fn test_empty_record_polls_none_repeatedly() {
    reset();
    for _ in 0..10 {
        assert_eq!(poll_next(), None);
        assert_eq!(poll_next_raw(), NONE_PENDING);
    }
    assert!(!has_pending());
    assert_eq!(pending_mask(), 0);
}

#[test]
#[serial]
fn test_ignored_signal_is_never_reported() {
    reset();
    let usr1 = number(SignalIdentity::User1);
    collect(usr1).unwrap();
    ignore(usr1).unwrap();

    raise_in_self(usr1).unwrap();
    assert_eq!(poll_next(), None);

    restore_default(usr1).unwrap();
}

#[test]
#[serial]
fn test_restored_default_stops_collection() {
    reset();
    // Default action for SIGWINCH is to ignore it, so raising is safe
    let winch = SignalNumber::from_raw(libc::SIGWINCH);
    collect(winch).unwrap();
    restore_default(winch).unwrap();

    raise_in_self(winch).unwrap();
    assert_eq!(poll_next(), None);
}

#[test]
#[serial]
fn test_guard_drop_restores_default() {
    reset();
    let urg = SignalNumber::from_raw(libc::SIGURG);
    {
        let guard = CollectionGuard::new(urg).unwrap();
        assert_eq!(guard.signum(), urg);
        raise_in_self(urg).unwrap();
        assert_eq!(poll_next(), Some(urg));
    }

    raise_in_self(urg).unwrap();
    assert_eq!(poll_next(), None);
}

#[test]
#[serial]
fn test_forgotten_guard_keeps_collecting() {
    reset();
    let usr2 = number(SignalIdentity::User2);
    CollectionGuard::new(usr2).unwrap().forget();

    raise_in_self(usr2).unwrap();
    assert_eq!(poll_next(), Some(usr2));

    restore_default(usr2).unwrap();
}

#[test]
#[serial]
fn test_reserved_signals_are_rejected() {
    let kill = SignalNumber::from_raw(libc::SIGKILL);
    let stop = SignalNumber::from_raw(libc::SIGSTOP);

    match collect(kill) {
        Err(SignalError::Rejected { operation, signum, .. }) => {
            assert_eq!(operation, SignalOperation::Collect);
            assert_eq!(signum, libc::SIGKILL);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(matches!(
        ignore(stop),
        Err(SignalError::Rejected {
            operation: SignalOperation::Ignore,
            ..
        })
    ));
}

#[test]
fn test_numbers_outside_record_are_refused() {
    assert_eq!(
        collect(SignalNumber::from_raw(40)),
        Err(SignalError::InvalidSignal(40))
    );
    assert_eq!(
        collect(SignalNumber::from_raw(0)),
        Err(SignalError::InvalidSignal(0))
    );
    assert_eq!(
        collect(SignalNumber::from_raw(-1)),
        Err(SignalError::InvalidSignal(-1))
    );
    assert_eq!(
        ignore(SignalNumber::from_raw(0)),
        Err(SignalError::InvalidSignal(0))
    );
    assert_eq!(
        raise_in_self(SignalNumber::from_raw(0)),
        Err(SignalError::InvalidSignal(0))
    );
}

#[test]
#[serial]
fn test_send_to_self_is_collected() {
    reset();
    let usr1 = number(SignalIdentity::User1);
    let _guard = CollectionGuard::new(usr1).unwrap();

    send_to(std::process::id(), usr1).unwrap();

    assert!(wait_until_pending(Duration::from_secs(2)));
    assert_eq!(poll_next(), Some(usr1));
}

#[test]
fn test_send_to_bad_pid_is_rejected() {
    let usr1 = number(SignalIdentity::User1);

    assert!(matches!(
        send_to(0, usr1),
        Err(SignalError::Rejected {
            operation: SignalOperation::Send,
            ..
        })
    ));
    // Above any pid_max the kernel allows
    assert!(send_to(i32::MAX as u32, usr1).is_err());
}

#[test]
#[serial]
fn test_signal_raised_on_other_thread_is_visible() {
    reset();
    let usr2 = number(SignalIdentity::User2);
    let _guard = CollectionGuard::new(usr2).unwrap();

    thread::spawn(move || raise_in_self(usr2).unwrap())
        .join()
        .unwrap();

    assert!(wait_until_pending(Duration::from_secs(2)));
    assert_eq!(poll_next(), Some(usr2));
}

#[test]
#[serial]
fn test_collector_accepts_in_range_numbers() {
    reset();
    for signum in [0, 1, 17, RECORD_WIDTH as i32 - 1] {
        collect_signal(signum);
        assert_eq!(poll_next(), Some(SignalNumber::from_raw(signum)));
    }
}

/// Run `f` in a forked child and assert it dies from SIGABRT
fn assert_aborts_in_child(f: impl FnOnce()) {
    use nix::sys::signal::Signal;
    use nix::sys::wait::{waitpid, WaitStatus};
    use nix::unistd::{fork, ForkResult};

    restore_default(number(SignalIdentity::Abort)).unwrap();

    // SAFETY: the child only runs allocation-free record code and leaves
    // through abort or _exit
    match unsafe { fork() }.unwrap() {
        ForkResult::Child => {
            f();
            unsafe { libc::_exit(0) }
        }
        ForkResult::Parent { child } => match waitpid(child, None).unwrap() {
            WaitStatus::Signaled(pid, Signal::SIGABRT, _) => assert_eq!(pid, child),
            status => panic!("child did not abort: {:?}", status),
        },
    }
}

#[test]
#[serial]
fn test_collector_aborts_on_out_of_range_number() {
    assert_aborts_in_child(|| collect_signal(RECORD_WIDTH as i32 + 8));
}

#[test]
#[serial]
fn test_record_mark_aborts_outside_width() {
    assert_aborts_in_child(|| EventRecord::new().mark(RECORD_WIDTH));
}
