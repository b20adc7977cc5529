
use mock::{bare_board, full_board, MockPin, Timeline};
use sx127x_board::{
    registers::Modem, Band, Board, BoardConfig, BoardFeatures, BoardPins, ConfigError, DioLine,
    LogicalPin, OperatingMode, PaLimits, PaPath,
};

type TestBoard<'a> = Board<'a, MockPin, MockPin, 3>;

fn full_pins(t: &Timeline) -> BoardPins<MockPin, MockPin> {
    BoardPins::new(t.pin("reset"))
        .with_antenna_switch(t.pin("sw1"), t.pin("sw2"))
        .with_tcxo(t.pin("tcxo"))
        .with_debug(t.pin("dbg_tx"), t.pin("dbg_rx"))
}

#[test]
fn builds_without_touching_pins() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    assert!(!board.is_initialized());
    assert!(t.events().is_empty());
}

#[test]
fn missing_switch_handles_rejected() {
    let t = Timeline::new();
    let pins = BoardPins::new(t.pin("reset"))
        .with_tcxo(t.pin("tcxo"))
        .with_debug(t.pin("dbg_tx"), t.pin("dbg_rx"));
    let result: Result<TestBoard, _> = Board::new(full_board(), pins);
    assert_eq!(result.err(), Some(ConfigError::MissingPin(LogicalPin::AntSw1)));
}

#[test]
fn handle_for_undeclared_feature_rejected() {
    let t = Timeline::new();
    let pins = BoardPins::new(t.pin("reset")).with_tcxo(t.pin("tcxo"));
    let result: Result<TestBoard, _> = Board::new(bare_board(), pins);
    assert_eq!(result.err(), Some(ConfigError::UnexpectedPin(LogicalPin::TcxoEn)));
}

#[test]
fn declared_feature_without_binding_rejected() {
    let t = Timeline::new();
    let config = BoardConfig {
        features: BoardFeatures::TCXO,
        ..BoardConfig::LORA_MODULE
    };
    let pins = BoardPins::new(t.pin("reset")).with_tcxo(t.pin("tcxo"));
    let result: Result<TestBoard, _> = Board::new(config, pins);
    assert_eq!(result.err(), Some(ConfigError::MissingPin(LogicalPin::TcxoEn)));
}

#[test]
fn irq_table_larger_than_wired_lines_rejected() {
    let t = Timeline::new();
    let result: Result<Board<'_, MockPin, MockPin, 4>, _> = Board::new(full_board(), full_pins(&t));
    assert_eq!(result.err(), Some(ConfigError::MissingPin(LogicalPin::Dio3)));

    let result: Result<Board<'_, MockPin, MockPin, 0>, _> =
        Board::new(bare_board(), BoardPins::new(t.pin("reset")));
    assert_eq!(result.err(), Some(ConfigError::InvalidDioCount(0)));
}

#[test]
fn inverted_frequency_range_rejected() {
    let t = Timeline::new();
    let mut config = bare_board();
    config.frequency.min_hz = 1_020_000_000;
    config.frequency.max_hz = 137_000_000;
    let result: Result<TestBoard, _> = Board::new(config, BoardPins::new(t.pin("reset")));
    assert_eq!(result.err(), Some(ConfigError::InvalidFrequencyRange));
}

#[test]
fn pa_limits_beyond_transceiver_rejected() {
    let t = Timeline::new();
    let mut config = bare_board();
    config.pa.pa_boost_max_dbm = PaLimits::PA_BOOST_CEILING_DBM + 1;
    let result: Result<TestBoard, _> = Board::new(config, BoardPins::new(t.pin("reset")));
    assert_eq!(result.err(), Some(ConfigError::InvalidPaLimits));
}

#[test]
fn presets_build() {
    let t = Timeline::new();
    let lora: Result<TestBoard, _> = Board::new(BoardConfig::LORA_MODULE, BoardPins::new(t.pin("reset")));
    assert!(lora.is_ok());

    let rfsw: Result<Board<'_, MockPin, MockPin, 4>, _> = Board::new(
        BoardConfig::SX1276_RFSW,
        BoardPins::new(t.pin("reset")).with_antenna_switch(t.pin("sw1"), t.pin("sw2")),
    );
    assert!(rfsw.is_ok());

    let tcxo: Result<Board<'_, MockPin, MockPin, 4>, _> =
        Board::new(BoardConfig::SX1276_TCXO, full_pins(&t));
    assert!(tcxo.is_ok());
}

#[test]
fn init_drives_idle_levels() {
    let t = Timeline::new();
    let mut board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    board.init().unwrap();

    assert!(board.is_initialized());
    // RESET is active low: released means high
    assert_eq!(t.level("reset"), Some(true));
    assert_eq!(t.level("sw1"), Some(false));
    assert_eq!(t.level("sw2"), Some(false));
    assert_eq!(t.level("tcxo"), Some(false));
    assert!(!board.is_tcxo_enabled());
    #[cfg(feature = "debug-pins")]
    {
        assert_eq!(t.level("dbg_tx"), Some(false));
        assert_eq!(t.level("dbg_rx"), Some(false));
    }
}

#[test]
fn init_is_idempotent() {
    let t = Timeline::new();
    let mut board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    board.init().unwrap();
    let first = t.events();
    t.clear();
    board.init().unwrap();
    assert_eq!(t.events(), first);
    assert!(board.is_initialized());
}

#[test]
fn init_after_deinit_starts_from_standby() {
    let t = Timeline::new();
    let mut board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    board.init().unwrap();
    board.set_antenna_switch(OperatingMode::RxContinuous).unwrap();
    assert_eq!(t.level("sw2"), Some(true));
    board.deinit().unwrap();
    assert_eq!(t.level("sw2"), Some(false));

    board.init().unwrap();
    assert_eq!(t.level("sw1"), Some(false));
    assert_eq!(t.level("sw2"), Some(false));
    assert_eq!(board.operating_mode(), OperatingMode::Standby);

    board.set_antenna_switch(OperatingMode::RxContinuous).unwrap();
    assert_eq!(t.level("sw2"), Some(true));
}

#[test]
fn deinit_parks_outputs_and_keeps_handlers() {
    use core::sync::atomic::{AtomicU32, Ordering};

    let hits = AtomicU32::new(0);
    let on_dio = |_: DioLine| {
        hits.fetch_add(1, Ordering::Relaxed);
    };

    let t = Timeline::new();
    let mut board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    board.init().unwrap();
    board.register_irq_handler(DioLine::Dio0, &on_dio).unwrap();
    board.set_antenna_switch(OperatingMode::Tx).unwrap();
    board.set_tcxo(true).unwrap();
    assert_eq!(t.level("sw1"), Some(true));
    assert_eq!(t.level("tcxo"), Some(true));

    board.deinit().unwrap();
    assert!(!board.is_initialized());
    assert_eq!(t.level("sw1"), Some(false));
    assert_eq!(t.level("sw2"), Some(false));
    assert_eq!(t.level("tcxo"), Some(false));
    assert_eq!(t.level("reset"), Some(true));
    assert_eq!(board.operating_mode(), OperatingMode::Tx);

    board.dispatch(0);
    assert_eq!(hits.load(Ordering::Relaxed), 1);

    t.clear();
    board.deinit().unwrap();
    assert!(t.events().iter().all(|e| !matches!(e, mock::Event::Pin(_, true))));
}

#[test]
fn release_returns_handles() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    let pins = board.release();

    assert_eq!(pins.reset.name(), "reset");
    let (sw1, sw2) = pins.antenna_switch.unwrap();
    assert_eq!((sw1.name(), sw2.name()), ("sw1", "sw2"));
    assert_eq!(pins.tcxo.unwrap().name(), "tcxo");
    #[cfg(feature = "debug-pins")]
    assert!(pins.debug.is_some());
    #[cfg(not(feature = "debug-pins"))]
    assert!(pins.debug.is_none());
}

#[test]
fn init_register_table() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(bare_board(), BoardPins::new(t.pin("reset"))).unwrap();
    let regs = board.init_registers();

    assert_eq!(regs.len(), 16);
    assert_eq!((regs[0].address, regs[0].value), (0x0C, 0x23));
    let last = regs[regs.len() - 1];
    assert_eq!(last.modem, Modem::LoRa);
    assert_eq!((last.address, last.value), (0x23, 0x40));
}

#[test]
fn frequency_queries() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(bare_board(), BoardPins::new(t.pin("reset"))).unwrap();

    assert!(board.is_frequency_supported(868_100_000));
    assert!(board.is_frequency_supported(433_000_000));
    assert!(!board.is_frequency_supported(2_400_000_000));
    assert!(board.is_frequency_supported(137_000_000));
    assert!(board.is_frequency_supported(1_020_000_000));
    assert!(!board.is_frequency_supported(136_999_999));
    assert!(!board.is_frequency_supported(1_020_000_001));

    assert_eq!(board.frequency_band(433_000_000), Band::Low);
    assert_eq!(board.frequency_band(525_000_000), Band::Low);
    assert_eq!(board.frequency_band(868_100_000), Band::High);
}

#[test]
fn pa_queries() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(bare_board(), BoardPins::new(t.pin("reset"))).unwrap();

    let low = board.select_pa_path(10);
    assert_eq!(low.path, PaPath::Rfo);
    assert_eq!(low.register_value, 0x7A);

    let high = board.select_pa_path(20);
    assert_eq!(high.path, PaPath::PaBoost);
    assert_eq!(high.register_value, 0xFF);
    assert!(high.high_power);

    let capped = board.select_pa_path(16);
    assert_eq!(capped.path, PaPath::Rfo);
    assert_eq!(capped.power_dbm, 14);
}

#[test]
fn queries_do_not_touch_pins() {
    let t = Timeline::new();
    let board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    let _ = board.select_pa_path(14);
    let _ = board.is_frequency_supported(915_000_000);
    let _ = board.frequency_band(915_000_000);
    let _ = board.tcxo_wakeup_time_ms();
    assert!(t.events().is_empty());
}

#[test]
fn shutdown_clears_handlers_after_deinit() {
    use core::sync::atomic::{AtomicU32, Ordering};

    let hits = AtomicU32::new(0);
    let on_dio = |_: DioLine| {
        hits.fetch_add(1, Ordering::Relaxed);
    };

    let t = Timeline::new();
    let mut board: TestBoard = Board::new(full_board(), full_pins(&t)).unwrap();
    board.init().unwrap();
    board.register_irq_handler(DioLine::Dio1, &on_dio).unwrap();

    board.deinit().unwrap();
    assert!(board.irq_router().is_registered(DioLine::Dio1));

    board.clear_irq_handlers();
    board.dispatch(1);
    assert!(!board.irq_router().is_registered(DioLine::Dio1));
    assert_eq!(hits.load(Ordering::Relaxed), 0);
}
