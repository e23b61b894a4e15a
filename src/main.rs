#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::unwrap;

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, channel::Channel, signal::Signal};
use embassy_time::Timer;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, battery::Battery, display::Display, vibrator::Vibrator};
use system::{
    bluetooth::{self, Server},
    config::{self, SystemConfig},
    time::TimeManager,
};

// Watch face
use chrono::NaiveDateTime;
use pinetime_watchface::{
    clock::HourPadding,
    host::{BatteryMonitor, Clock, ConnectionMonitor, Haptics},
    status::ChargeState,
    Event, ResourcePool, WatchApp,
};

#[cfg(not(feature = "plain-face"))]
type Face = pinetime_watchface::StatusWatchface<'static>;
#[cfg(feature = "plain-face")]
type Face = pinetime_watchface::PlainWatchface<'static>;

// Include current UTC epoch at compile time
include!(concat!(env!("OUT_DIR"), "/utc.rs"));

// Communication channels
static EVENTS: Channel<ThreadModeRawMutex, Event, 4> = Channel::new();
static VIBRATE: Signal<ThreadModeRawMutex, ()> = Signal::new();

static RESOURCES: StaticCell<ResourcePool> = StaticCell::new();
static SERVER: StaticCell<Server> = StaticCell::new();

/// Host services backing the watch face
struct PineTimeHost {
    time: TimeManager,
    battery: ChargeState,
    connected: bool,
}

impl Clock for PineTimeHost {
    fn now(&self) -> NaiveDateTime {
        self.time.now()
    }

    fn is_24h_style(&self) -> bool {
        config::CLOCK_24H
    }

    fn hour_padding(&self) -> HourPadding {
        config::HOUR_PADDING
    }
}

impl BatteryMonitor for PineTimeHost {
    fn charge_state(&self) -> ChargeState {
        self.battery
    }
}

impl ConnectionMonitor for PineTimeHost {
    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Haptics for PineTimeHost {
    fn double_pulse(&mut self) {
        VIBRATE.signal(());
    }
}

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise and report connection changes
#[embassy_executor::task]
async fn bluetooth_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    bluetooth::run(sd, server, EVENTS.sender()).await
}

/// Fetch the battery status from the hardware.
#[embassy_executor::task]
async fn battery_task(mut battery: Battery, server: &'static Server) {
    loop {
        Timer::after(config::BATTERY_POLL_INTERVAL).await;

        if battery.update().await {
            let state = battery.state();
            defmt::info!("Battery status updated: {}", state);
            if server.bas.battery_level_set(&state.charge_percent).is_err() {
                defmt::warn!("Could not update battery characteristic");
            }
            EVENTS.send(Event::Battery(state)).await;
        }
    }
}

/// Send a tick on every minute boundary
#[embassy_executor::task]
async fn tick_task(time: TimeManager) {
    loop {
        Timer::after(time.until_next_minute()).await;
        EVENTS.send(Event::Tick(time.now())).await;
    }
}

/// Run haptic feedback requested by the watch face
#[embassy_executor::task]
async fn vibration_task(mut vibrator: Vibrator) {
    loop {
        VIBRATE.wait().await;
        vibrator.double_pulse().await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Keep peripheral interrupts clear of the SoftDevice priorities
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize Battery
    let battery = Battery::init(saadc, Input::new(p.P0_12, Pull::None)).await;

    // Initialize vibration motor
    let vibrator = Vibrator::init(Output::new(p.P0_16, Level::High, OutputDrive::Standard));

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let backlight = Backlight::init(
        Output::new(p.P0_14, Level::High, OutputDrive::Standard),
        Output::new(p.P0_22, Level::High, OutputDrive::Standard),
        Output::new(p.P0_23, Level::High, OutputDrive::Standard),
    );
    let mut display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::High, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
        backlight,
    ));
    unwrap!(display.set_brightness(config::BACKLIGHT_LEVEL));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::generate_config());
    let server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    let server: &'static Server = server;
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Launch the watch face
    let time = TimeManager::init(UTC_EPOCH, config::UTC_OFFSET_SECS);
    let mut host = PineTimeHost {
        time,
        battery: battery.state(),
        connected: false,
    };
    let resources: &'static ResourcePool = RESOURCES.init(ResourcePool::new());
    let mut app = unwrap!(WatchApp::<Face>::launch(resources, &mut host));
    if app.render(display.lcd()).is_err() {
        defmt::warn!("Display update failed");
    }

    defmt::info!("Initialization finished");

    // Schedule tasks
    let subscriptions = app.subscriptions();
    defmt::info!("Subscriptions: {}", subscriptions);
    if subscriptions.tick.is_some() {
        unwrap!(spawner.spawn(tick_task(time)));
    }
    if subscriptions.battery {
        unwrap!(spawner.spawn(battery_task(battery, server)));
    }
    if subscriptions.connection {
        unwrap!(spawner.spawn(vibration_task(vibrator)));
    }
    unwrap!(spawner.spawn(bluetooth_task(sd, server)));

    // Dispatch events one at a time
    loop {
        let event = EVENTS.receive().await;
        match event {
            Event::Battery(state) => host.battery = state,
            Event::Connection(connected) => host.connected = connected,
            Event::Tick(_) => {}
        }

        app.handle(&mut host, event);
        if app.render(display.lcd()).is_err() {
            defmt::warn!("Display update failed");
        }
    }
}
