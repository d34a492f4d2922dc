//! Round trips over a real tty, using a pseudo-terminal as the display.

#![cfg(target_os = "linux")]

use pico7219_core::protocol::Transport;
use serialport::{SerialPort, TTYPort};
use std::io::{ErrorKind, Read, Write};
use std::thread;
use std::time::Duration;

/// Open a pty pair and release the slave side so it can be opened by path
fn pty_device() -> (TTYPort, String) {
    let (master, slave) = TTYPort::pair().expect("Unable to create pseudo-terminal pair");
    let path = slave.name().expect("pseudo-terminal has no name");
    drop(slave);
    (master, path)
}

/// Answer one request line on the master side
fn answer_one(mut master: TTYPort, reply: &'static [u8]) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        master
            .set_timeout(Duration::from_millis(100))
            .expect("set master timeout");
        let mut request = Vec::new();
        let mut byte = [0u8; 1];
        for _ in 0..50 {
            match master.read(&mut byte) {
                Ok(1) if byte[0] == b'\n' => {
                    master.write_all(reply).expect("write reply");
                    break;
                }
                Ok(1) => request.push(byte[0]),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::TimedOut => {}
                Err(e) => panic!("master read failed: {e}"),
            }
        }
        request
    })
}

#[test]
fn test_init_deinit_init() {
    let (_master, path) = pty_device();
    let mut transport = Transport::new(path);

    transport.init().expect("first init");
    assert!(transport.is_open());
    transport.deinit();
    assert!(!transport.is_open());
    transport.init().expect("second init");
    assert!(transport.is_open());
}

#[test]
fn test_round_trip_over_pty() {
    let (master, path) = pty_device();
    let mut transport = Transport::new(path);
    transport.init().expect("init");

    let device = answer_one(master, b"0 OK\n");
    transport.turn_on(3, 4).expect("turn on");

    let request = device.join().expect("device thread");
    assert_eq!(request, b"A4,3".to_vec());
}
