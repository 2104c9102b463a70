//! Integration tests for void_dispatch

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use void_dispatch::*;

/// Owner thread draining at a fixed cadence until told to stop
fn spawn_owner(
    dispatcher: Arc<CommandDispatcher<Vec<u64>>>,
    running: Arc<AtomicBool>,
) -> thread::JoinHandle<Vec<u64>> {
    thread::spawn(move || {
        let mut state = Vec::new();
        while running.load(Ordering::SeqCst) {
            dispatcher.drain_and_run_all(&mut state);
            thread::sleep(Duration::from_millis(1));
        }
        dispatcher.drain_and_run_all(&mut state);
        state
    })
}

#[test]
fn test_blocking_waiters_with_live_owner() {
    let dispatcher = Arc::new(CommandDispatcher::new());
    let running = Arc::new(AtomicBool::new(true));
    let owner = spawn_owner(dispatcher.clone(), running.clone());

    let callers: Vec<_> = (0..4u64)
        .map(|caller| {
            let dispatcher = dispatcher.clone();
            thread::spawn(move || {
                (0..25u64)
                    .map(|i| {
                        let value = caller * 100 + i;
                        dispatcher
                            .submit(move |state: &mut Vec<u64>| {
                                state.push(value);
                                state.len()
                            })
                            .wait()
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for caller in callers {
        let lengths = caller.join().unwrap();
        assert!(lengths.windows(2).all(|w| w[0] < w[1]));
    }

    running.store(false, Ordering::SeqCst);
    let state = owner.join().unwrap();
    assert_eq!(state.len(), 100);
}

#[test]
fn test_async_waiter() {
    let dispatcher = Arc::new(CommandDispatcher::<Vec<u64>>::new());
    let running = Arc::new(AtomicBool::new(true));
    let owner = spawn_owner(dispatcher.clone(), running.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let result = runtime.block_on(async {
        dispatcher
            .submit(|state: &mut Vec<u64>| {
                state.push(7);
                state.iter().sum::<u64>()
            })
            .wait_async()
            .await
    });
    assert_eq!(result, Ok(7));

    running.store(false, Ordering::SeqCst);
    owner.join().unwrap();
}

#[test]
fn test_shutdown_while_waiting_does_not_hang() {
    // No owner: the unit can only be released by shutdown.
    let dispatcher = Arc::new(CommandDispatcher::<Vec<u64>>::new());

    let waiter = {
        let dispatcher = dispatcher.clone();
        thread::spawn(move || dispatcher.submit(|state: &mut Vec<u64>| state.len()).wait())
    };

    while dispatcher.pending() == 0 {
        thread::yield_now();
    }
    dispatcher.shutdown();

    assert_eq!(waiter.join().unwrap(), Err(DispatchError::Shutdown));
}
