use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use powerchart::api::{Chart, ChartOptions, ChartPipeline, read_chart_file};
use powerchart::render::{Renderer, SvgDocument, SvgRenderer};
use powerchart::telemetry;

const USAGE: &str = "usage:
  svgdiagram draw <input> <output|-> [--json] [--fragment] [--corrected=<path>] [options]
  svgdiagram example <csv-path>
options:
  --width=<int>                 chart width in pixels (default 1000)
  --height=<int>                chart height in pixels (default 500)
  --axis-area-width=<int>       width of the axis label band (default 15)
  --spread-range=<50..100>      % of samples kept inside the y band (default 90)
  --spread-factor=<float>       re-admission factor for trimmed extremes (default 1.1)
  --max-average-quotient=<int>  drop trimming above max/average (default 1)
  --moving-average[=<span>]     smooth y series (default span 5)
  --title=<text>                chart title (default Diagram)";

const EXAMPLE_PERIODS: f64 = 4.0;
const EXAMPLE_ROWS: usize = 500 - 15;

#[derive(Debug)]
enum CommandKind {
    Draw(DrawArgs),
    Example { output: PathBuf },
}

#[derive(Debug)]
struct DrawArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    json: bool,
    document: SvgDocument,
    corrected: Option<PathBuf>,
    options: ChartOptions,
}

fn main() {
    let _ = telemetry::init_default_tracing("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    match parse_args()? {
        CommandKind::Draw(args) => draw(args),
        CommandKind::Example { output } => write_example(&output),
    }
}

fn parse_args() -> Result<CommandKind, String> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("draw") => {
            let input = args.next().map(PathBuf::from).ok_or_else(|| USAGE.to_owned())?;
            let output = match args.next().as_deref() {
                Some("-") => None,
                Some(path) => Some(PathBuf::from(path)),
                None => return Err(USAGE.to_owned()),
            };

            let mut json = false;
            let mut document = SvgDocument::Page;
            let mut corrected = None;
            let mut chart_args = Vec::new();
            for arg in args {
                match arg.as_str() {
                    "--json" => json = true,
                    "--fragment" => document = SvgDocument::Fragment,
                    "--help" | "-h" => return Err(USAGE.to_owned()),
                    _ => match arg.strip_prefix("--corrected=") {
                        Some(path) => corrected = Some(PathBuf::from(path)),
                        None => chart_args.push(arg),
                    },
                }
            }
            let options = ChartOptions::from_args(&chart_args).map_err(|err| err.to_string())?;
            Ok(CommandKind::Draw(DrawArgs {
                input,
                output,
                json,
                document,
                corrected,
                options,
            }))
        }
        Some("example") => {
            let output = args.next().map(PathBuf::from).ok_or_else(|| USAGE.to_owned())?;
            Ok(CommandKind::Example { output })
        }
        _ => Err(USAGE.to_owned()),
    }
}

fn draw(args: DrawArgs) -> Result<(), String> {
    let pipeline = ChartPipeline::new(args.options).map_err(|err| err.to_string())?;
    let mut chart = read_chart_file(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    pipeline.prepare(&mut chart).map_err(|err| err.to_string())?;

    if let Some(path) = &args.corrected {
        let file = File::create(path)
            .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
        chart.write_delimited(file).map_err(|err| err.to_string())?;
    }

    let frame = pipeline.project(&chart).map_err(|err| err.to_string())?;
    let content = if args.json {
        frame
            .to_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?
    } else {
        let mut renderer = SvgRenderer::new(args.document);
        renderer.render(&frame).map_err(|err| err.to_string())?;
        renderer.into_output()
    };

    match &args.output {
        Some(path) => fs::write(path, content)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => io::stdout()
            .write_all(content.as_bytes())
            .map_err(|err| format!("failed to write stdout: {err}")),
    }
}

/// Writes sine, cosine and clipped tangent over a few periods.
fn write_example(path: &Path) -> Result<(), String> {
    let mut chart = Chart::from_titles(["x", "sin(x)", "cos(x)", "tan(x)"])
        .map_err(|err| err.to_string())?;
    for index in 0..EXAMPLE_ROWS {
        let x = index as f64 * EXAMPLE_PERIODS * std::f64::consts::PI / EXAMPLE_ROWS as f64;
        chart
            .add_row([x, x.sin(), x.cos(), x.tan().clamp(-1.0, 1.0)])
            .map_err(|err| err.to_string())?;
    }
    let file = File::create(path)
        .map_err(|err| format!("failed to create `{}`: {err}", path.display()))?;
    chart.write_delimited(file).map_err(|err| err.to_string())?;
    println!("written: {}", path.display());
    Ok(())
}
