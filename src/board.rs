//! Board context
//!
//! [`Board`] owns every board-level resource the transceiver driver needs:
//! the reset line, the antenna switch, the TCXO supply, the debug pins and
//! the DIO handler table. The driver keeps one `Board` and passes it by
//! reference to the operations below; there is no global state.
//!
//! # Example
//! ```no_run
//! use embedded_hal::{delay::DelayNs, digital::OutputPin};
//! use sx127x_board::{Board, BoardConfig, BoardPins, Error, OperatingMode};
//!
//! fn bring_up<RESET: OutputPin, OUT: OutputPin>(
//!     reset: RESET,
//!     delay: &mut impl DelayNs,
//! ) -> Result<(), Error> {
//!     let mut board: Board<'_, RESET, OUT, 3> =
//!         Board::new(BoardConfig::LORA_MODULE, BoardPins::new(reset))?;
//!     board.init()?;
//!     board.reset(delay)?;
//!
//!     let pa = board.select_pa_path(14);
//!     assert!(board.is_frequency_supported(868_100_000));
//!     board.set_antenna_switch(OperatingMode::Tx)?;
//!     # let _ = pa;
//!     Ok(())
//! }
//! ```

use embedded_hal::digital::OutputPin;

use crate::{
    config::{BoardConfig, BoardFeatures},
    control::{
        AntennaSwitch, Band, DebugPins, DioHandler, FrequencyValidator, IrqRouter, PaPathDecision,
        PaSelector, ResetSequencer, SwitchState, TcxoController,
    },
    error::{ConfigError, Error},
    pins::{DioLine, Line, LogicalPin},
    registers::{OperatingMode, RegisterInit},
};

/// Pin handles supplied by the HAL
///
/// `RESET` is the reset line; every optional output (antenna switch, TCXO
/// enable, debug) shares the `OUT` type. Handles must be present exactly for
/// the features the board configuration declares.
pub struct BoardPins<RESET, OUT> {
    pub reset: RESET,
    /// ANT_SW1, ANT_SW2
    pub antenna_switch: Option<(OUT, OUT)>,
    pub tcxo: Option<OUT>,
    /// DBG_TX, DBG_RX
    pub debug: Option<(OUT, OUT)>,
}

impl<RESET, OUT> BoardPins<RESET, OUT> {
    pub fn new(reset: RESET) -> Self {
        Self {
            reset,
            antenna_switch: None,
            tcxo: None,
            debug: None,
        }
    }

    pub fn with_antenna_switch(mut self, sw1: OUT, sw2: OUT) -> Self {
        self.antenna_switch = Some((sw1, sw2));
        self
    }

    pub fn with_tcxo(mut self, enable: OUT) -> Self {
        self.tcxo = Some(enable);
        self
    }

    pub fn with_debug(mut self, tx: OUT, rx: OUT) -> Self {
        self.debug = Some((tx, rx));
        self
    }
}

/// Board abstraction for one SX127x transceiver with `DIO` interrupt lines
pub struct Board<'a, RESET, OUT, const DIO: usize> {
    config: BoardConfig,
    reset: ResetSequencer<RESET>,
    pa: PaSelector,
    antenna: AntennaSwitch<OUT>,
    frequency: FrequencyValidator,
    tcxo: TcxoController<OUT>,
    debug: DebugPins<OUT>,
    irq: IrqRouter<'a, DIO>,
    initialized: bool,
}

impl<'a, RESET, OUT, const DIO: usize> Board<'a, RESET, OUT, DIO> {
    /// Validates `config` against the supplied pins and builds the board.
    ///
    /// Fails if a declared feature has no binding or no pin handle, if a
    /// handle is supplied for an undeclared feature, or if any board limit
    /// is out of range. No pin is touched.
    pub fn new(config: BoardConfig, pins: BoardPins<RESET, OUT>) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate(DIO) {
            #[cfg(feature = "defmt")]
            defmt::warn!("board '{}' rejected: {}", config.name, err);
            return Err(err);
        }

        let BoardPins {
            reset,
            antenna_switch,
            tcxo,
            debug,
        } = pins;

        let antenna = match check_handles(&config, BoardFeatures::ANTENNA_SWITCH, antenna_switch, LogicalPin::AntSw1)? {
            Some((sw1, sw2)) => AntennaSwitch::new(
                Line::new(sw1, config.pins.active_level(LogicalPin::AntSw1)),
                Line::new(sw2, config.pins.active_level(LogicalPin::AntSw2)),
            ),
            None => AntennaSwitch::absent(),
        };

        let tcxo = match check_handles(&config, BoardFeatures::TCXO, tcxo, LogicalPin::TcxoEn)? {
            Some(enable) => TcxoController::new(
                Line::new(enable, config.pins.active_level(LogicalPin::TcxoEn)),
                config.tcxo_wakeup_ms,
            ),
            None => TcxoController::absent(),
        };

        let debug = debug_pins(&config, check_handles(&config, BoardFeatures::DEBUG_PINS, debug, LogicalPin::DbgTx)?);

        #[cfg(feature = "defmt")]
        defmt::debug!("board '{}' configured: {}, {} DIO lines", config.name, config.features, DIO);

        Ok(Self {
            reset: ResetSequencer::new(
                Line::new(reset, config.pins.active_level(LogicalPin::Reset)),
                config.reset,
            ),
            pa: PaSelector::new(config.pa)?,
            antenna,
            frequency: FrequencyValidator::new(config.frequency, config.mid_band_hz),
            tcxo,
            debug,
            irq: IrqRouter::new(),
            initialized: false,
            config,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Whether [`init`](Board::init) ran more recently than
    /// [`deinit`](Board::deinit).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Releases the pin handles.
    pub fn release(self) -> BoardPins<RESET, OUT> {
        let (dbg_tx, dbg_rx) = self.debug.release();
        BoardPins {
            reset: self.reset.release(),
            antenna_switch: self.antenna.release(),
            tcxo: self.tcxo.release(),
            debug: dbg_tx.zip(dbg_rx),
        }
    }

    /// Registers written by the driver after every reset.
    pub fn init_registers(&self) -> &'static [RegisterInit] {
        self.config.init_registers
    }

    /// Installs `handlers[i]` on DIO line `i`, replacing the whole table.
    pub fn register_irq_handlers(&mut self, handlers: &[Option<&'a dyn DioHandler>]) -> Result<(), Error> {
        self.irq.register_handlers(handlers)
    }

    pub fn register_irq_handler(&mut self, line: DioLine, handler: &'a dyn DioHandler) -> Result<(), Error> {
        self.irq.register(line, handler)
    }

    /// Empties the DIO handler table. [`deinit`](Board::deinit) leaves it
    /// untouched.
    pub fn clear_irq_handlers(&mut self) {
        self.irq.clear()
    }

    /// Forwards an edge on DIO line `dio_index` to its handler. Safe to call
    /// from interrupt context.
    #[inline]
    pub fn dispatch(&self, dio_index: usize) {
        self.irq.dispatch(dio_index)
    }

    pub fn irq_router(&self) -> &IrqRouter<'a, DIO> {
        &self.irq
    }

    pub fn select_pa_path(&self, power_dbm: i8) -> PaPathDecision {
        self.pa.select(power_dbm)
    }

    pub fn is_frequency_supported(&self, freq_hz: u32) -> bool {
        self.frequency.is_supported(freq_hz)
    }

    pub fn frequency_band(&self, freq_hz: u32) -> Band {
        self.frequency.band(freq_hz)
    }

    pub fn operating_mode(&self) -> OperatingMode {
        self.antenna.mode()
    }

    pub fn antenna_state(&self) -> SwitchState {
        self.antenna.state()
    }

    pub fn tcxo_wakeup_time_ms(&self) -> u32 {
        self.tcxo.wakeup_time_ms()
    }

    pub fn is_tcxo_enabled(&self) -> bool {
        self.tcxo.is_enabled()
    }
}

impl<'a, RESET, OUT, const DIO: usize> Board<'a, RESET, OUT, DIO>
where
    RESET: OutputPin,
    OUT: OutputPin,
{
    /// Drives every owned output to its idle level: reset released, antenna
    /// switch off in Standby, TCXO off, debug pins low.
    pub fn init(&mut self) -> Result<(), Error> {
        self.reset.deassert()?;
        self.antenna.idle()?;
        self.tcxo.set(false)?;
        self.debug.write_tx(false)?;
        self.debug.write_rx(false)?;
        self.initialized = true;
        Ok(())
    }

    /// Puts the pins in their low-power state ahead of MCU sleep: antenna
    /// switch off, TCXO off, debug pins low. The reset line stays released
    /// and DIO handlers stay registered, so a later [`init`](Board::init)
    /// resumes with the same handlers. On shutdown, call
    /// [`clear_irq_handlers`](Board::clear_irq_handlers) as well, or
    /// [`release`](Board::release) the board.
    pub fn deinit(&mut self) -> Result<(), Error> {
        self.antenna.set_low_power(true)?;
        self.tcxo.set(false)?;
        self.debug.write_tx(false)?;
        self.debug.write_rx(false)?;
        self.initialized = false;
        Ok(())
    }

    /// Resets the transceiver, blocking on `delay` for the full sequence.
    pub fn reset<D: embedded_hal::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.reset.reset(delay)
    }

    /// Asynchronous version of [`reset`](Board::reset).
    pub async fn reset_async<D: embedded_hal_async::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.reset.reset_async(delay).await
    }

    pub fn set_antenna_switch(&mut self, mode: OperatingMode) -> Result<(), Error> {
        self.antenna.set_mode(mode)
    }

    /// Like [`set_antenna_switch`](Board::set_antenna_switch) for a raw
    /// `RegOpMode` mode value. Undefined values fail with
    /// [`Error::UndefinedMode`].
    pub fn set_antenna_switch_raw(&mut self, mode: u8) -> Result<(), Error> {
        self.antenna.set_mode_raw(mode)
    }

    pub fn set_antenna_low_power(&mut self, enabled: bool) -> Result<(), Error> {
        self.antenna.set_low_power(enabled)
    }

    pub fn set_tcxo(&mut self, enabled: bool) -> Result<(), Error> {
        self.tcxo.set(enabled)
    }

    /// Enables the TCXO and blocks for its wake-up time.
    pub fn enable_tcxo<D: embedded_hal::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.tcxo.enable_and_wait(delay)
    }

    /// Asynchronous version of [`enable_tcxo`](Board::enable_tcxo).
    pub async fn enable_tcxo_async<D: embedded_hal_async::delay::DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.tcxo.enable_and_wait_async(delay).await
    }

    #[inline]
    pub fn write_debug_tx(&mut self, active: bool) -> Result<(), Error> {
        self.debug.write_tx(active)
    }

    #[inline]
    pub fn write_debug_rx(&mut self, active: bool) -> Result<(), Error> {
        self.debug.write_rx(active)
    }
}

/// Matches supplied handles against the declared feature set.
fn check_handles<T>(
    config: &BoardConfig,
    feature: BoardFeatures,
    handles: Option<T>,
    pin: LogicalPin,
) -> Result<Option<T>, ConfigError> {
    match (config.has(feature), handles) {
        (true, None) => Err(ConfigError::MissingPin(pin)),
        (false, Some(_)) => Err(ConfigError::UnexpectedPin(pin)),
        (_, handles) => Ok(handles),
    }
}

#[cfg(feature = "debug-pins")]
fn debug_pins<OUT>(config: &BoardConfig, handles: Option<(OUT, OUT)>) -> DebugPins<OUT> {
    match handles {
        Some((tx, rx)) => DebugPins::new(
            Line::new(tx, config.pins.active_level(LogicalPin::DbgTx)),
            Line::new(rx, config.pins.active_level(LogicalPin::DbgRx)),
        ),
        None => DebugPins::absent(),
    }
}

#[cfg(not(feature = "debug-pins"))]
fn debug_pins<OUT>(_config: &BoardConfig, _handles: Option<(OUT, OUT)>) -> DebugPins<OUT> {
    DebugPins::absent()
}
