#[cfg(feature = "cairo-backend")]
use chart_canvas::api::{ChartView, ChartViewConfig, ManualRepaint};
#[cfg(feature = "cairo-backend")]
use chart_canvas::core::DeviceSize;
#[cfg(feature = "cairo-backend")]
use chart_canvas::model::CommandList;
#[cfg(feature = "cairo-backend")]
use chart_canvas::render::{CairoImageCanvas, PassOutcome};
#[cfg(feature = "cairo-backend")]
use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;
#[cfg(feature = "cairo-backend")]
use std::rc::Rc;

#[cfg(feature = "cairo-backend")]
const DEFAULT_WIDTH: u32 = 640;
#[cfg(feature = "cairo-backend")]
const DEFAULT_HEIGHT: u32 = 400;

#[cfg(feature = "cairo-backend")]
struct Args {
    input: PathBuf,
    output: PathBuf,
    size: DeviceSize,
    config: Option<PathBuf>,
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut config = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args
                .next()
                .ok_or_else(|| "--config expects a path".to_owned())?;
            config = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }

    if positional.len() < 2 || positional.len() > 4 {
        return Err(
            "usage: render_chart_json <input.json> <output.png> [width] [height] [--config view.json]"
                .to_owned(),
        );
    }
    let parse_dim = |index: usize, default: u32| -> Result<u32, String> {
        positional.get(index).map_or(Ok(default), |raw| {
            raw.parse::<u32>()
                .map_err(|err| format!("invalid dimension `{raw}`: {err}"))
        })
    };

    Ok(Args {
        input: PathBuf::from(&positional[0]),
        output: PathBuf::from(&positional[1]),
        size: DeviceSize::new(parse_dim(2, DEFAULT_WIDTH)?, parse_dim(3, DEFAULT_HEIGHT)?),
        config,
    })
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    let _ = chart_canvas::telemetry::init_default_tracing();
    let args = parse_args()?;

    let input = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read {}: {err}", args.input.display()))?;
    let model = Rc::new(CommandList::from_json_compat_str(&input).map_err(|err| err.to_string())?);

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
            ChartViewConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartViewConfig::default(),
    };

    let mut view = ChartView::new(config, ManualRepaint).map_err(|err| err.to_string())?;
    view.set_model(&model);

    let mut image = CairoImageCanvas::new(args.size).map_err(|err| err.to_string())?;
    let report = view.repaint_now(image.canvas_mut());
    if let PassOutcome::Aborted { error, .. } | PassOutcome::InvalidExtent(error) = &report.outcome
    {
        return Err(format!("render failed: {error}"));
    }
    for skipped in &report.skipped {
        eprintln!(
            "skipped command #{} ({:?}): {}",
            skipped.index, skipped.kind, skipped.error
        );
    }

    image
        .write_png(&args.output)
        .map_err(|err| err.to_string())?;
    println!(
        "rendered {} of {} commands to {}",
        report.drawn,
        model.len(),
        args.output.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("render_chart_json requires the `cairo-backend` feature");
    std::process::exit(1);
}
