//! LayerLink: keyboard layer remote control firmware
//!
//! Exposes the chip's USB-Serial-JTAG port to the host and runs the command
//! loop on a fixed tick. Frames like `KBLS1\n` switch keyboard layers; every
//! frame is answered with `OK\n` or `ERR:<d>\n`.
//!
//! Key scanning and keymap lookup read the layer mask published in
//! `LAYER_MASK`; they are not part of this binary.

#![no_std]
#![no_main]

use esp_backtrace as _;

esp_bootloader_esp_idf::esp_app_desc!();

use core::cell::Cell;
use core::sync::atomic::{AtomicU32, Ordering};
use critical_section::Mutex;
use embassy_time::{Duration, Ticker, Timer};
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::usb_serial_jtag::{UsbSerialJtag, UsbSerialJtagRx, UsbSerialJtagTx};
use esp_hal::Blocking;

use layerlink::protocol::VERSION;
use layerlink::transport::{Endpoint, EndpointError, SerialPort};
use layerlink::{board, ControlConfig, ControlStats, LayerState, RemoteControl};

// ── Shared state ─────────────────────────────────────────────────────

/// Active layer bitmask, published after every tick for the keymap
static LAYER_MASK: AtomicU32 = AtomicU32::new(0);

/// Snapshot of the command loop counters for the status task
static STATS: Mutex<Cell<ControlStats>> = Mutex::new(Cell::new(ControlStats::new()));

// ── USB-Serial-JTAG endpoint ─────────────────────────────────────────

/// Raw endpoint over the USB-Serial-JTAG FIFOs.
struct UsbEndpoint {
    rx: UsbSerialJtagRx<'static, Blocking>,
    tx: UsbSerialJtagTx<'static, Blocking>,
}

impl Endpoint for UsbEndpoint {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        self.rx.drain_rx_fifo(buf)
    }

    fn write_packet(&mut self, data: &[u8]) -> Result<usize, EndpointError> {
        let mut written = 0;
        for &byte in data {
            if self.tx.write_byte_nb(byte).is_err() {
                break;
            }
            written += 1;
        }
        if written == 0 {
            return Err(EndpointError::Busy);
        }
        // Push the partial packet out instead of waiting for a full FIFO
        let _ = self.tx.flush_tx_nb();
        Ok(written)
    }
}

// ── Entry point ──────────────────────────────────────────────────────

#[esp_rtos::main]
async fn main(spawner: embassy_executor::Spawner) {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Start the RTOS; requires timer + software interrupt
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);

    log::info!("LayerLink v{} starting on {}", VERSION, board::BOARD_NAME);

    let (rx, tx) = UsbSerialJtag::new(peripherals.USB_DEVICE).split();
    let port = SerialPort::new(UsbEndpoint { rx, tx }, board::USB_PACKET_SIZE);

    spawner.spawn(control_task(port)).unwrap();
    spawner.spawn(status_task()).unwrap();

    log::info!("Command loop running every {} ms", board::TICK_INTERVAL_MS);

    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}

/// Command loop: one receive / dispatch / send cycle per tick, then one
/// packet flushed to the USB endpoint.
#[embassy_executor::task]
async fn control_task(mut port: SerialPort<UsbEndpoint>) {
    let mut control: RemoteControl = RemoteControl::new(ControlConfig::new());
    let mut layers = LayerState::new();
    let mut ticker = Ticker::every(Duration::from_millis(board::TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        control.tick(&mut port, &mut layers);
        port.service();

        LAYER_MASK.store(layers.state(), Ordering::Relaxed);
        let stats = control.stats();
        critical_section::with(|cs| STATS.borrow(cs).set(stats));
    }
}

/// Periodic status reporting task
#[embassy_executor::task]
async fn status_task() {
    loop {
        Timer::after(Duration::from_secs(board::STATUS_INTERVAL_SECS)).await;

        let stats = critical_section::with(|cs| STATS.borrow(cs).get());
        log::info!(
            "layers={:08X} frames={} errors={} overflows={} dropped={}",
            LAYER_MASK.load(Ordering::Relaxed),
            stats.frames,
            stats.errors,
            stats.overflows,
            stats.dropped_responses,
        );
    }
}
