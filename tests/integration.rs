use firmata::protocol::constants::*;
use firmata::{CallbackError, CallbackResult, Callbacks, Context, Error, PinCapability, PinMode, State};

#[derive(Default)]
struct MockBoard {
    analog: [u16; 16],
    ports: [u16; 16],
    modes: [u16; 16],
    values: [u16; 16],
    report_analog: [u16; 16],
    report_digital: [u16; 16],
    sent: Vec<u8>,
    chunks: usize,
}

static PIN_CAPS: [PinCapability; 14] = [
    PinCapability::new(0, PinMode::Serial, PIN_RES_SERIAL_RX0),
    PinCapability::new(0, PinMode::Input, 1),
    PinCapability::new(0, PinMode::Output, 1),
    PinCapability::new(0, PinMode::Analog, 10),
    PinCapability::new(1, PinMode::Serial, PIN_RES_SERIAL_TX0),
    PinCapability::new(1, PinMode::Input, 1),
    PinCapability::new(1, PinMode::Output, 1),
    PinCapability::new(1, PinMode::Analog, 10),
    PinCapability::new(2, PinMode::Input, 1),
    PinCapability::new(2, PinMode::Output, 1),
    PinCapability::new(2, PinMode::I2c, 1),
    PinCapability::new(3, PinMode::Input, 1),
    PinCapability::new(3, PinMode::Output, 1),
    PinCapability::new(3, PinMode::I2c, 1),
];

const PIN_CAPS_RESPONSE: [u8; 35] = [
    // Header
    0xF0, 0x6C,
    // Pin 0
    0x0A, 0x00, 0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x7F,
    // Pin 1
    0x0A, 0x01, 0x00, 0x01, 0x01, 0x01, 0x02, 0x0A, 0x7F,
    // Pin 2
    0x00, 0x01, 0x01, 0x01, 0x06, 0x01, 0x7F,
    // Pin 3
    0x00, 0x01, 0x01, 0x01, 0x06, 0x01, 0x7F,
    // Footer
    0xF7,
];

const ANALOG_MAP: [u8; 15] = [
    0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05,
];

fn serial_output(bytes: &[u8], board: &mut MockBoard) -> CallbackResult {
    board.sent.extend_from_slice(bytes);
    board.chunks += 1;
    Ok(())
}

macro_rules! store {
    ($name:ident, $field:ident) => {
        fn $name<const IN: usize, const OUT: usize>(
            ctx: &mut Context<MockBoard, IN, OUT>,
            _cmd: u8,
            channel: u8,
            value: u16,
        ) -> CallbackResult {
            ctx.user_data_mut().$field[channel as usize & 0x0F] = value;
            Ok(())
        }
    };
}

store!(analog_io, analog);
store!(digital_io, ports);
store!(set_pin_mode, modes);
store!(set_pin_value, values);
store!(report_analog, report_analog);
store!(report_digital, report_digital);

fn analog_mapping_query<const IN: usize, const OUT: usize>(
    ctx: &mut Context<MockBoard, IN, OUT>,
    _cmd: u8,
    _id: u8,
) -> CallbackResult {
    ctx.output_analog_mapping_response(&ANALOG_MAP).map_err(|_| CallbackError)
}

fn capability_query<const IN: usize, const OUT: usize>(
    ctx: &mut Context<MockBoard, IN, OUT>,
    _cmd: u8,
    _id: u8,
) -> CallbackResult {
    ctx.output_capability_response(&PIN_CAPS).map_err(|_| CallbackError)
}

fn mock_board<const IN: usize, const OUT: usize>() -> Context<MockBoard, IN, OUT> {
    let callbacks: Callbacks<MockBoard, IN, OUT> = Callbacks {
        output: Some(serial_output),
        analog_io: Some(analog_io),
        digital_io: Some(digital_io),
        report_analog: Some(report_analog),
        report_digital: Some(report_digital),
        set_pin_mode: Some(set_pin_mode),
        set_pin_value: Some(set_pin_value),
        analog_mapping_query: Some(analog_mapping_query),
        capability_query: Some(capability_query),
    };

    let mut ctx = Context::new(MockBoard::default());
    ctx.attach_callbacks(&callbacks);
    ctx
}

#[test]
fn analog_io_frames() {
    let cases: &[([u8; 3], usize, u16)] = &[
        ([0xE0, 0x00, 0x01], 0x0, 0x80),
        ([0xE1, 0x52, 0x00], 0x1, 0x52),
        ([0xE3, 0x63, 0x01], 0x3, 0xE3),
        ([0xEF, 0x7F, 0x01], 0xF, 0xFF),
        ([0xE2, 0x7F, 0x03], 0x2, 0x01FF),
    ];

    let mut ctx = mock_board::<64, 64>();
    for (frame, pin, value) in cases {
        assert_eq!(ctx.feed_all(frame), Ok(()));
        assert_eq!(ctx.user_data().analog[*pin], *value);
    }
}

#[test]
fn digital_io_frames() {
    let cases: &[([u8; 3], usize, u16)] = &[
        ([0x90, 0x00, 0x01], 0x0, 0x80),
        ([0x91, 0x52, 0x00], 0x1, 0x52),
        ([0x93, 0x63, 0x01], 0x3, 0xE3),
        ([0x9F, 0x7F, 0x01], 0xF, 0xFF),
    ];

    let mut ctx = mock_board::<64, 64>();
    for (frame, port, value) in cases {
        assert_eq!(ctx.feed_all(frame), Ok(()));
        assert_eq!(ctx.user_data().ports[*port], *value);
    }
}

#[test]
fn report_and_pin_frames() {
    let mut ctx = mock_board::<64, 64>();
    assert_eq!(ctx.feed_all(&[0xC5, ENABLE_REPORT, 0xD2, ENABLE_REPORT]), Ok(()));
    assert_eq!(ctx.feed_all(&[SET_PIN_MODE, 13, PinMode::Output as u8, SET_PIN_VALUE, 13, 1]), Ok(()));

    let board = ctx.user_data();
    assert_eq!(board.report_analog[5], 1);
    assert_eq!(board.report_digital[2], 1);
    assert_eq!(board.modes[13], 1);
    assert_eq!(board.values[13], 1);
}

#[test]
fn protocol_version_query() {
    let mut ctx = mock_board::<64, 64>();
    assert_eq!(ctx.feed(PROTOCOL_VERSION), Ok(()));
    assert_eq!(ctx.user_data().sent, [0xF9, 0x02, 0x06]);
}

#[test]
fn capability_query_answered_by_handler() {
    let mut ctx = mock_board::<64, 64>();
    assert_eq!(ctx.feed_all(&[0xF0, 0x6B, 0xF7]), Ok(()));
    assert_eq!(ctx.user_data().sent, PIN_CAPS_RESPONSE);
    assert_eq!(ctx.state(), State::Command);
}

#[test]
fn analog_mapping_query_answered_by_handler() {
    let mut ctx = mock_board::<64, 64>();
    assert_eq!(ctx.feed_all(&[0xF0, 0x69, 0xF7]), Ok(()));

    let sent = &ctx.user_data().sent;
    assert_eq!(sent.len(), 18);
    assert_eq!(sent[..2], [0xF0, 0x6A]);
    assert_eq!(sent[2..17], ANALOG_MAP);
    assert_eq!(sent[17], 0xF7);
}

#[test]
fn small_output_buffer_sends_same_bytes() {
    let mut large = mock_board::<64, 64>();
    let mut small = mock_board::<64, 2>();

    for ctx_bytes in [&[0xF0, 0x6B, 0xF7][..], &[0xF0, 0x69, 0xF7][..], &[0xF9][..]] {
        large.feed_all(ctx_bytes).unwrap();
        small.feed_all(ctx_bytes).unwrap();
    }
    large.output_string_data("This is a firmata string data test").unwrap();
    small.output_string_data("This is a firmata string data test").unwrap();

    assert_eq!(large.user_data().sent, small.user_data().sent);
    assert!(small.user_data().chunks > large.user_data().chunks);
}

#[test]
fn long_string_data() {
    let mut ctx = mock_board::<64, 64>();
    let text = "This is a firmata string data test";
    assert_eq!(ctx.output_string_data(text), Ok(()));

    let sent = &ctx.user_data().sent;
    assert_eq!(sent.len(), 2 + 2 * text.len() + 1);
    assert_eq!(sent[..2], [START_SYSEX, STRING_DATA]);
    for (pair, byte) in sent[2..sent.len() - 1].chunks(2).zip(text.bytes()) {
        assert_eq!(pair, [byte, 0x00]);
    }
    assert_eq!(sent[sent.len() - 1], END_SYSEX);
}

#[test]
fn data_byte_in_command_state_resets() {
    let mut ctx = mock_board::<64, 64>();
    for byte in 0x00..0x80u8 {
        assert_eq!(ctx.feed(byte), Err(Error::UnsupportedCommand));
        assert_eq!(ctx.remaining(), 0);
        assert_eq!(ctx.input_len(), 0);
    }
    assert_eq!(ctx.feed_all(&[0xE3, 0x63, 0x01]), Ok(()));
    assert_eq!(ctx.user_data().analog[3], 0xE3);
}

#[test]
fn interrupted_frame_is_discarded() {
    let mut ctx = mock_board::<64, 64>();
    // A new command byte in the middle of a frame fails and is not retried.
    assert_eq!(ctx.feed_all(&[0xE3, 0x63, 0x91]), Err(Error::UnsupportedCommand));
    assert_eq!(ctx.remaining(), 0);
    assert_eq!(ctx.input_len(), 0);
    assert_eq!(ctx.feed_all(&[0x00, 0x01]), Err(Error::UnsupportedCommand));
    assert_eq!(ctx.user_data().analog, [0; 16]);
    assert_eq!(ctx.user_data().ports, [0; 16]);
}

#[test]
fn unterminated_sysex_stays_pending() {
    let mut ctx = mock_board::<8, 64>();
    assert_eq!(ctx.feed_all(&[0xF0, 0x6B]), Ok(()));
    assert_eq!(ctx.state(), State::CommandData);

    ctx.reset_decoder();
    assert_eq!(ctx.feed_all(&[0xF0, 0x6B, 0xF7]), Ok(()));
    assert_eq!(ctx.user_data().sent, PIN_CAPS_RESPONSE);
}

#[test]
fn oversized_sysex_overflows_input() {
    let mut ctx = mock_board::<4, 64>();
    assert_eq!(ctx.feed_all(&[0xF0, 0x71, 0x41, 0x00, 0x42, 0x00, 0xF7]), Err(Error::BufferFull));
    assert_eq!(ctx.input_len(), 0);
    assert_eq!(ctx.state(), State::Command);
}
