//! brewpanel-hw-interface
//!
//! Two-button menu → parameter table → OLED firmware for the Raspberry Pi
//! Pico 2. Wires the library crates into a live loop:
//!
//! 1. The menu task polls both buttons every 10 ms and runs one
//!    `MenuController::tick()` against the shared `ParameterTable`.
//! 2. It publishes the resulting `MenuFrame` to the display task.
//! 3. The OLED task wakes at 30 Hz, redraws when the frame changed and
//!    flushes it to the panel.
//! 4. The control task drains `take_control_changes()` once per second,
//!    standing in for the temperature control loop.
//!
//! Parameters live in RAM (`MemoryStorage`); "Save" writes there until a
//! flash-backed `ParameterStorage` is added.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use brewpanel_display::{menu_display_task, DisplayConfig, OledDriver};
use brewpanel_input::{ActiveLevel, ButtonId, ButtonPin};
use brewpanel_menu::{MenuConfig, MenuController, MenuFrame, MenuLines};
use brewpanel_params::parameters::{MemoryStorage, ParameterTable};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

type Params = ParameterTable<MemoryStorage>;

/// Authoritative parameter values. Written by the menu task, drained by the
/// control task.
static PARAMS: StaticCell<Mutex<CriticalSectionRawMutex, Params>> = StaticCell::new();

/// Latest menu frame. Written by the menu task, read by the OLED task.
static FRAME: StaticCell<Mutex<CriticalSectionRawMutex, MenuFrame>> = StaticCell::new();

/// Concrete I2C type for the OLED display (sole device on I2C0).
type OledI2c = I2c<'static, I2C0, i2c::Async>;

/// Button poll period.
const TICK_MS: u64 = 10;

/// Control-loop stand-in period.
const CONTROL_PERIOD_MS: u64 = 1000;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises `menu_display_task` for the concrete bus.
#[embassy_executor::task]
async fn oled_task(
    driver: OledDriver<OledI2c>,
    frame: &'static Mutex<CriticalSectionRawMutex, MenuFrame>,
    config: DisplayConfig,
) {
    menu_display_task(driver, frame, config).await;
}

/// Cooperative button polling and menu tick.
///
/// The parameter mutex is held for the in-memory tick and frame build only;
/// the frame mutex only for the copy.
#[embassy_executor::task]
async fn menu_task(
    mut left: ButtonPin<Input<'static>>,
    mut right: ButtonPin<Input<'static>>,
    params: &'static Mutex<CriticalSectionRawMutex, Params>,
    frame_out: &'static Mutex<CriticalSectionRawMutex, MenuFrame>,
) {
    info!("Menu task started");

    let mut menu = MenuController::new(MenuLines::standard(), MenuConfig::default());
    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    loop {
        ticker.next().await;

        let raw = [left.is_active(), right.is_active()];
        // Millisecond counter truncated to u32; the debouncer handles wrap.
        let now = Instant::now().as_millis() as u32;

        let frame = {
            let mut table = params.lock().await;
            let report = menu.tick_checked(raw, now, &mut *table);
            for event in report.events.iter() {
                info!("menu: {}", event);
            }
            menu.frame(&*table)
        }; // parameter mutex released here

        *frame_out.lock().await = frame;
    }
}

/// Stand-in for the temperature control loop: applies setpoint changes.
#[embassy_executor::task]
async fn control_task(params: &'static Mutex<CriticalSectionRawMutex, Params>) {
    let mut ticker = Ticker::every(Duration::from_millis(CONTROL_PERIOD_MS));

    loop {
        ticker.next().await;

        let changes = params.lock().await.take_control_changes();
        for change in changes.iter() {
            info!("control: {} = {}", change.id.key(), change.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("brewpanel-hw-interface starting");

    // ── Pin assignments ───────────────────────────────────────────────
    // I2C_SDA   → GP20  (p.PIN_20)
    // I2C_SCL   → GP21  (p.PIN_21)
    // BTN_LEFT  → GP14  (p.PIN_14)  active-low, pull-up enabled
    // BTN_RIGHT → GP15  (p.PIN_15)  active-low, pull-up enabled

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );
    let oled_driver = OledDriver::new(i2c, brewpanel_display::driver::DEFAULT_ADDRESS);

    let left = ButtonPin::new(ButtonId::Left, Input::new(p.PIN_14, Pull::Up), ActiveLevel::Low);
    let right = ButtonPin::new(ButtonId::Right, Input::new(p.PIN_15, Pull::Up), ActiveLevel::Low);

    // ── Parameter table ───────────────────────────────────────────────

    let mut table = ParameterTable::new(MemoryStorage::new());
    match table.load_from_storage() {
        Ok(0) => info!("Parameters loaded"),
        Ok(replaced) => warn!("{} stored parameters out of range, defaults used", replaced),
        Err(e) => error!("Parameter load failed: {}", e),
    }

    let params = PARAMS.init(Mutex::new(table));
    let frame = FRAME.init(Mutex::new(MenuFrame::default()));

    // ── Spawn tasks ───────────────────────────────────────────────────

    let display_config = DisplayConfig::default(); // 30 Hz refresh rate

    spawner.spawn(unwrap!(oled_task(oled_driver, frame, display_config)));
    spawner.spawn(unwrap!(menu_task(left, right, params, frame)));
    spawner.spawn(unwrap!(control_task(params)));

    info!("All tasks spawned");
}
