use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wifi_qr::{
    DecodeError, ECLevel, EncodeError, PayloadError, RasterImage, RenderOptions, ScanSession,
    Security, StillFrames, WiFiCredential, build_wifi_payload, encode, parse_wifi_payload,
    to_image,
};

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR code generator, Wi-Fi QR generator and scanner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into a PNG
    Encode {
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "M")]
        ec: ECLevel,
        /// Pixels per module
        #[arg(long, default_value_t = 8)]
        scale: usize,
        #[arg(long, default_value = "qr.png")]
        out: PathBuf,
    },
    /// Build a Wi-Fi payload, print it and encode it into a PNG
    Wifi {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// WPA, WEP or nopass
        #[arg(long, default_value = "WPA")]
        security: Security,
        #[arg(long)]
        hidden: bool,
        #[arg(long, default_value = "M")]
        ec: ECLevel,
        #[arg(long, default_value_t = 8)]
        scale: usize,
        /// Defaults to wifi-<ssid>-qr.png
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decode the first QR code in an image
    Decode {
        #[arg(long)]
        image: PathBuf,
    },
    /// Treat images as consecutive camera frames and stop at the first hit
    Scan {
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Delay between frames, defaults to QR_SCAN_INTERVAL_MS
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("{}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Encode {
            text,
            ec,
            scale,
            out,
        } => encode_cmd(&text, ec, scale, &out),
        Command::Wifi {
            ssid,
            password,
            security,
            hidden,
            ec,
            scale,
            out,
        } => {
            let cred = WiFiCredential::new(ssid, password, security).with_hidden(hidden);
            wifi_cmd(&cred, ec, scale, out)
        }
        Command::Decode { image } => decode_cmd(&image),
        Command::Scan {
            images,
            interval_ms,
        } => scan_cmd(&images, interval_ms),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn encode_cmd(text: &str, ec: ECLevel, scale: usize, out: &Path) -> Result<(), CliError> {
    let symbol = encode(text, ec)?;
    save_png(&to_image(&symbol, RenderOptions::with_scale(scale)), out)?;
    println!(
        "Wrote {} (version {}, level {}, mask {})",
        out.display(),
        symbol.version(),
        symbol.ec_level(),
        symbol.mask().bits()
    );
    Ok(())
}

fn wifi_cmd(
    cred: &WiFiCredential,
    ec: ECLevel,
    scale: usize,
    out: Option<PathBuf>,
) -> Result<(), CliError> {
    let payload = build_wifi_payload(cred)?;
    println!("{payload}");
    let out = out.unwrap_or_else(|| PathBuf::from(format!("wifi-{}-qr.png", file_stem(&cred.ssid))));
    encode_cmd(&payload, ec, scale, &out)
}

fn decode_cmd(image: &Path) -> Result<(), CliError> {
    let frame = load_frame(image)?;
    let qr = wifi_qr::decode(&frame)?;
    println!("{}", qr.content);
    if let Ok(cred) = parse_wifi_payload(&qr.content) {
        println!(
            "  Wi-Fi network '{}' ({}{})",
            cred.ssid,
            cred.security,
            if cred.hidden { ", hidden" } else { "" }
        );
    }
    println!(
        "  version={} error_correction={} mask={}",
        qr.version,
        qr.error_correction,
        qr.mask_pattern.bits()
    );
    Ok(())
}

fn scan_cmd(images: &[PathBuf], interval_ms: Option<u64>) -> Result<(), CliError> {
    let frames = images
        .iter()
        .map(|path| load_frame(path))
        .collect::<Result<Vec<_>, _>>()?;
    let mut session = ScanSession::new(StillFrames::new(frames));
    if let Some(ms) = interval_ms {
        session = session.with_interval(Duration::from_millis(ms));
    }
    let qr = session.run()?;
    println!("{}", qr.content);
    println!("  frame {} of {}", session.frames_tried(), images.len());
    Ok(())
}

fn load_frame(path: &Path) -> Result<RasterImage, CliError> {
    image::open(path)
        .map(|img| RasterImage::from_dynamic(&img))
        .map_err(|source| CliError::Image {
            path: path.to_path_buf(),
            source,
        })
}

fn save_png(img: &image::GrayImage, path: &Path) -> Result<(), CliError> {
    img.save(path).map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// SSID reduced to characters safe in a file name
fn file_stem(ssid: &str) -> String {
    ssid.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
