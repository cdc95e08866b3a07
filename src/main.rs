use std::{env::var, path::PathBuf};

use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use embedded_hal::delay::DelayNs;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::{debug, warn};

use simple_lcd::{
    config::{BusAddress, DisplayGeometry, LineCount, Timing, DEFAULT_DEVICE},
    lcd::Lcd,
    sender::SendCommand,
    Error,
};

/// Print a message on a Hitachi HD44780 LCD connected over I2C.
///
/// The text replaces the whole row: it is cut at the display width, and the
/// rest of the row is blanked.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    after_help = "Example:\n  sudo simple_lcd -R4 -c16 -r1 -t'hello world!'\n\nwrites 'hello world!' on the first row of a 4x16 display."
)]
struct Args {
    /// Number of rows of the display: 1, 2 or 4
    #[arg(short = 'R', long = "rows", default_value = "4", value_parser = parse_lines)]
    rows: LineCount,

    /// Number of columns of the display, between 16 and 80
    #[arg(short = 'c', long = "cols", default_value_t = 16)]
    cols: u8,

    /// Text to write
    #[arg(short, long)]
    text: String,

    /// Row to write to, starting at 1
    #[arg(short, long)]
    row: usize,

    /// Send the controller wake-up sequence first
    #[arg(short, long)]
    init: bool,

    /// I2C bus device node
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Target address of the adapter, in hexadecimal
    #[arg(short, long, default_value_t = BusAddress::default(), value_parser = parse_address)]
    address: BusAddress,

    /// Clear the display before writing
    #[arg(long)]
    clear: bool,

    /// Don't touch the bus, write every byte that would be sent to this file instead
    #[arg(long, value_name = "FILE")]
    dump: Option<PathBuf>,

    /// Set diagnostic log level
    ///
    /// Use multiple times to increase verbosity, up to '-vvv'. Setting $RUST_LOG
    /// also works, and takes precedence.
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_lines(arg: &str) -> Result<LineCount, String> {
    let lines: u8 = arg.parse().map_err(|err| format!("{err}"))?;
    LineCount::try_from(lines).map_err(|err| err.to_string())
}

fn parse_address(arg: &str) -> Result<BusAddress, String> {
    let digits = arg
        .strip_prefix("0x")
        .or_else(|| arg.strip_prefix("0X"))
        .unwrap_or(arg);
    let address = u8::from_str_radix(digits, 16).map_err(|err| format!("{err}"))?;
    BusAddress::new(address).map_err(|err| err.to_string())
}

fn init_logging(verbose: u8) {
    let init = if var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            })
            .try_init()
    };

    if let Err(err) = init {
        eprintln!("Failed to initialise logging\n{err}");
    }
}

/// Validate what clap can't check on its own, before anything touches the bus
fn geometry(args: &Args) -> DisplayGeometry {
    let geometry = DisplayGeometry::new(args.rows, args.cols, args.address)
        .unwrap_or_else(|err| Args::command().error(ErrorKind::ValueValidation, err).exit());

    let rows = geometry.lines().get();
    if args.row == 0 || args.row > usize::from(rows) {
        let err = Error::RowOutOfRange {
            row: args.row,
            rows,
        };
        Args::command().error(ErrorKind::ValueValidation, err).exit();
    }

    geometry
}

/// What the display gets once it is initialized
fn write<Sender, Delayer>(
    lcd: &mut Lcd<'_, '_, Sender, Delayer>,
    args: &Args,
) -> simple_lcd::Result<()>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    if args.clear {
        lcd.clear()?;
    }
    lcd.write_line(args.text.as_bytes(), args.row)
}

#[cfg(target_os = "linux")]
fn run(args: Args, geometry: DisplayGeometry) -> Result<()> {
    use std::{fs::File, io::BufWriter};

    use simple_lcd::{builder::Builder, dump::DumpBus, sender::I2cSender, transport};

    let mut delayer = transport::Delay;

    match &args.dump {
        Some(path) => {
            let file = File::create(path)
                .map_err(Error::Dump)
                .into_diagnostic()
                .wrap_err_with(|| format!("dump: create({})", path.display()))?;
            let mut bus = DumpBus::new(BufWriter::new(file));

            {
                let mut sender = I2cSender::with_timing(&mut bus, geometry.address(), Timing::none());
                let mut lcd = Builder::new(&mut sender, &mut delayer, geometry)
                    .timing(Timing::none())
                    .reset_sequence(args.init)
                    .init()
                    .into_diagnostic()?;
                write(&mut lcd, &args).into_diagnostic()?;
                lcd.shutdown();
            }

            let written = bus.written();
            if let Err(err) = bus.finish() {
                if err.is_fatal() {
                    return Err(err).into_diagnostic();
                }
                warn!("{err}");
            }
            debug!(written, path = %path.display(), "dump written");
        }

        None => {
            let mut bus = transport::open(&args.device, geometry.address()).into_diagnostic()?;

            {
                let mut sender = I2cSender::new(&mut bus, geometry.address());
                let mut lcd = Builder::new(&mut sender, &mut delayer, geometry)
                    .reset_sequence(args.init)
                    .init()
                    .into_diagnostic()?;
                write(&mut lcd, &args).into_diagnostic()?;
                lcd.shutdown();
            }

            // I2cdev closes on drop and has no way to report a failure
            drop(bus);
            debug!(device = %args.device.display(), "closed i2c bus");
        }
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_args: Args, _geometry: DisplayGeometry) -> Result<()> {
    miette::bail!("simple_lcd needs the Linux i2c-dev interface")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    debug!(?args, "got arguments");

    let geometry = geometry(&args);
    run(args, geometry)
}
