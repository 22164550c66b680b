#![no_std]
#![no_main]

use beef_core::{Controller, JoystickReport, OutputSink, ReportForwarder, BUTTON_COUNT};
use beef_firmware::config::{
    OUTPUT_RETRY_PERIOD, POLL_PERIOD, USB_MANUFACTURER, USB_PID, USB_PRODUCT, USB_SERIAL, USB_VID,
};
use beef_firmware::usb_output::JoystickReader;
use beef_firmware::{
    configure_usb_hid, Decoder, LightingRequestHandler, LightingSignal, TurntableInput,
    UsbHidOutput,
};
use defmt::{error, info, trace};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{with_timeout, Instant, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

type ReportSignal = Signal<CriticalSectionRawMutex, JoystickReport>;
type BeefController = Controller<Decoder, [Output<'static>; BUTTON_COUNT], BUTTON_COUNT>;

/// Latest assembled report, from the poll task to the output task.
static REPORT_SIGNAL: StaticCell<ReportSignal> = StaticCell::new();
/// Latest host lighting command, from the USB handlers to the poll task.
static LIGHTING_SIGNAL: StaticCell<LightingSignal> = StaticCell::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
/// SET_REPORT handler for the control pipe.
static CONTROL_HANDLER: StaticCell<LightingRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BEEF turntable controller starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let report_signal = REPORT_SIGNAL.init(Signal::new());
    let lighting_signal = LIGHTING_SIGNAL.init(Signal::new());

    // --- Buttons (active low) and their LEDs ---
    let buttons = [
        Input::new(p.PIN_0, Pull::Up),
        Input::new(p.PIN_1, Pull::Up),
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_5, Pull::Up),
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
        Input::new(p.PIN_10, Pull::Up),
    ];
    let leds = [
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
        Output::new(p.PIN_14, Level::Low),
        Output::new(p.PIN_15, Level::Low),
        Output::new(p.PIN_16, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
        Output::new(p.PIN_21, Level::Low),
    ];

    // --- Turntable ---
    #[cfg(feature = "turntable-quadrature")]
    let sensor = TurntableInput::new(Input::new(p.PIN_26, Pull::Up), Input::new(p.PIN_27, Pull::Up));
    #[cfg(feature = "turntable-analog")]
    let sensor = TurntableInput::new(
        embassy_rp::adc::Adc::new_blocking(p.ADC, embassy_rp::adc::Config::default()),
        embassy_rp::adc::Channel::new_pin(p.PIN_26, Pull::None),
    );

    let controller = Controller::new(TurntableInput::decoder(), leds);

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL);
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let control_handler = CONTROL_HANDLER.init(LightingRequestHandler::new(lighting_signal));
    let hid = configure_usb_hid(&mut builder, hid_state, control_handler);
    let (reader, writer) = hid.split();

    // Build the USB device
    let usb_device = builder.build();

    let usb_output = UsbHidOutput::new(writer);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device).unwrap());
    spawner.spawn(lighting_task(reader, LightingRequestHandler::new(lighting_signal)).unwrap());
    spawner.spawn(poll_task(controller, sensor, buttons, report_signal, lighting_signal).unwrap());
    spawner.spawn(output_task(usb_output, report_signal).unwrap());

    info!("BEEF initialized, polling inputs...");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Lighting task - receives interrupt OUT reports and hands them to the handler.
#[embassy_executor::task]
async fn lighting_task(reader: JoystickReader<'static>, mut handler: LightingRequestHandler) {
    reader.run(false, &mut handler).await;
}

/// Poll task - samples every input once per period and signals changed reports.
#[embassy_executor::task]
async fn poll_task(
    mut controller: BeefController,
    mut sensor: TurntableInput<'static>,
    mut buttons: [Input<'static>; BUTTON_COUNT],
    reports: &'static ReportSignal,
    lighting: &'static LightingSignal,
) {
    let mut ticker = Ticker::every(POLL_PERIOD);
    let mut previous = None;

    loop {
        if let Some(command) = lighting.try_take() {
            controller.on_host_lighting_command(command);
        }

        let report = controller.poll_inputs(sensor.sample(), &mut buttons, Instant::now());
        if previous != Some(report) {
            trace!("Report changed: {:?}", report);
            reports.signal(report);
            previous = Some(report);
        }

        ticker.next().await;
    }
}

/// Output task - waits for report signals and sends them to USB HID.
#[embassy_executor::task]
async fn output_task(mut output: UsbHidOutput<'static>, reports: &'static ReportSignal) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, forwarding reports...");

    let mut forwarder = ReportForwarder::new(output);
    loop {
        // A failed report is resent after a short wait unless newer input arrives first.
        let result = match forwarder.pending() {
            Some(_) => match with_timeout(OUTPUT_RETRY_PERIOD, reports.wait()).await {
                Ok(report) => forwarder.forward(report).await,
                Err(_) => forwarder.retry().await,
            },
            None => {
                let report = reports.wait().await;
                forwarder.forward(report).await
            }
        };

        if let Err(e) = result {
            error!("Output error: {:?}", e);
            if !forwarder.output().is_ready() {
                forwarder.output_mut().wait_ready().await;
                info!("USB HID ready again");
                forwarder.invalidate();
            }
        }
    }
}
