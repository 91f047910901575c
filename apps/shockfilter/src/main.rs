use argh::FromArgs;
use std::path::PathBuf;

use shock_image::FloatImage;
use shock_imgproc::filter::gaussian_blur;
use shock_imgproc::mean::mean_filter;
use shock_imgproc::{ImprovedShockFilter, SimpleShockFilter};
use shock_io::functional as F;

#[derive(FromArgs)]
/// Coherence-enhancing image filtering tools
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Shock(ShockArgs),
    Mean(MeanArgs),
    Blur(BlurArgs),
}

#[derive(FromArgs)]
/// Iteratively sharpen an image with a shock filter
#[argh(subcommand, name = "shock")]
struct ShockArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// stabilization blur scale
    #[argh(option, short = 's', default = "2.0")]
    sigma: f32,

    /// structure tensor integration scale (improved filter only)
    #[argh(option, short = 'r', default = "5.0")]
    rho: f32,

    /// initial blur scale (improved filter only)
    #[argh(option, short = 'k', default = "0.2")]
    omikron: f32,

    /// number of sharpening iterations
    #[argh(option, short = 'x', default = "5")]
    iterations: u32,

    /// rotation of the sharpening direction in degrees
    #[argh(option, short = 'a', default = "0.0")]
    alpha: f32,

    /// use the isotropic filter instead of the coherence-enhancing one
    #[argh(switch)]
    simple: bool,
}

#[derive(FromArgs)]
/// Box-mean filter an image via a summed-area table
#[argh(subcommand, name = "mean")]
struct MeanArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// side length of the averaging square
    #[argh(option, short = 'w', default = "23")]
    window: usize,
}

#[derive(FromArgs)]
/// Blur an image with a separable Gaussian
#[argh(subcommand, name = "blur")]
struct BlurArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// blur scale
    #[argh(option, short = 's', default = "1.0")]
    sigma: f32,
}

/// A configuration error reported before any image is decoded or written.
#[derive(thiserror::Error, Debug)]
enum ConfigError {
    #[error("{0} must be positive, got {1}")]
    NonPositiveScale(&'static str, f32),

    #[error("window must be at least 1")]
    WindowTooSmall,
}

fn ensure_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || value <= 0.0 {
        return Err(ConfigError::NonPositiveScale(name, value));
    }
    Ok(())
}

fn run_shock(args: ShockArgs) -> Result<(), Box<dyn std::error::Error>> {
    ensure_positive("sigma", args.sigma)?;
    if !args.simple {
        ensure_positive("rho", args.rho)?;
        ensure_positive("omikron", args.omikron)?;
    }

    let (size, samples) = F::read_image_rgb8(&args.input)?;
    log::info!("decoded {} from {}", size, args.input.display());

    let img = FloatImage::from_rgb8(size, &samples)?;
    let mut filtered = if args.simple {
        log::info!(
            "simple shock filter: sigma={} iterations={}",
            args.sigma,
            args.iterations
        );
        SimpleShockFilter::new(args.sigma, args.iterations).apply(&img)?
    } else {
        log::info!(
            "improved shock filter: sigma={} rho={} omikron={} iterations={} alpha={}deg",
            args.sigma,
            args.rho,
            args.omikron,
            args.iterations,
            args.alpha
        );
        ImprovedShockFilter::new(
            args.sigma,
            args.rho,
            args.omikron,
            args.iterations,
            args.alpha.to_radians(),
        )
        .apply(&img)?
    };

    // with zero iterations no shock step has saturated the blurred input yet
    filtered.saturate();

    F::write_image_rgb8(&args.output, size, &filtered.to_rgb8())?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn run_mean(args: MeanArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.window < 1 {
        return Err(ConfigError::WindowTooSmall.into());
    }

    let (size, samples) = F::read_image_rgb8(&args.input)?;
    log::info!("decoded {} from {}", size, args.input.display());

    let filtered = mean_filter(&samples, size, args.window);

    F::write_image_rgb8(&args.output, size, &filtered)?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn run_blur(args: BlurArgs) -> Result<(), Box<dyn std::error::Error>> {
    ensure_positive("sigma", args.sigma)?;

    let (size, samples) = F::read_image_rgb8(&args.input)?;
    log::info!("decoded {} from {}", size, args.input.display());

    let img = FloatImage::from_rgb8(size, &samples)?;
    let mut blurred = gaussian_blur(&img, args.sigma)?;
    blurred.saturate();

    F::write_image_rgb8(&args.output, size, &blurred.to_rgb8())?;
    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Shock(shock) => run_shock(shock),
        Command::Mean(mean) => run_mean(mean),
        Command::Blur(blur) => run_blur(blur),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_validation() {
        assert!(ensure_positive("sigma", 2.0).is_ok());
        assert!(ensure_positive("sigma", 0.0).is_err());
        assert!(ensure_positive("rho", -1.0).is_err());
        assert!(ensure_positive("omikron", f32::NAN).is_err());
    }
}
