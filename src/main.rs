//! CLI front-end: file loading, image decode/encode, and strategy
//! selection around the annoview library. All drawing logic lives in the
//! library; this binary only moves bytes.

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use annoview::format::{ExtractOptions, extract_boxes_from_file};
use annoview::overlay::{LabelFont, OverlayStrategy, RenderOptions, StrategyRegistry};

const USAGE: &str = "usage: annoview <annotations.json|dir> <image|dir> <output|dir> \
                     [--strategy SEL] [--font PATH] [--strict]";

/// Image extensions tried when pairing annotation files with images.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

struct CliArgs {
    annotations: PathBuf,
    image: PathBuf,
    output: PathBuf,
    strategy: String,
    font: Option<PathBuf>,
    strict: bool,
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let mut positional = Vec::new();
    let mut strategy = String::from("1");
    let mut font = None;
    let mut strict = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--strategy" | "-s" => strategy = iter.next()?.clone(),
            "--font" => font = Some(PathBuf::from(iter.next()?)),
            "--strict" => strict = true,
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    if positional.len() != 3 {
        return None;
    }
    let mut positional = positional.into_iter();
    Some(CliArgs {
        annotations: positional.next()?,
        image: positional.next()?,
        output: positional.next()?,
        strategy,
        font,
        strict,
    })
}

fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&raw) else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let registry = StrategyRegistry::new();
    let strategy = match registry.select(&args.strategy) {
        Ok(strategy) => strategy,
        Err(e) => {
            eprintln!("{} (available: {})", e, registry.ids().join(", "));
            return ExitCode::FAILURE;
        }
    };

    let mut options = RenderOptions::new();
    if let Some(ref font_path) = args.font {
        match LabelFont::from_file(font_path) {
            Ok(font) => options = options.font(font),
            Err(e) => {
                eprintln!("{}: {}", font_path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        log::warn!("No --font given; label text will be skipped");
    }

    if args.annotations.is_dir() && args.image.is_dir() {
        run_batch(&args, strategy, &options)
    } else {
        match run_pair(&args.annotations, &args.image, &args.output, strategy, &options, args.strict)
        {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{}: {}", args.annotations.display(), e);
                ExitCode::FAILURE
            }
        }
    }
}

/// Overlay one annotation document onto one image.
fn run_pair(
    annotations: &Path,
    image_path: &Path,
    output: &Path,
    strategy: &dyn OverlayStrategy,
    options: &RenderOptions,
    strict: bool,
) -> Result<(), Box<dyn Error>> {
    let extract_options = ExtractOptions::new().strict(strict);
    let extraction = extract_boxes_from_file(annotations, &extract_options)?;

    let mut image = image::open(image_path)?.to_rgb8();
    let result = strategy.render(&mut image, &extraction.boxes, options);
    image.save(output)?;

    log::info!(
        "{}: {} box(es) drawn, {} skipped ({})",
        output.display(),
        result.boxes_drawn,
        result.boxes_skipped,
        strategy.display_name()
    );
    Ok(())
}

/// Overlay a directory of documents onto their stem-matched images.
///
/// One failing pair never blocks its siblings; it is reported and the
/// batch moves on.
fn run_batch(args: &CliArgs, strategy: &dyn OverlayStrategy, options: &RenderOptions) -> ExitCode {
    if let Err(e) = std::fs::create_dir_all(&args.output) {
        log::error!("{}: {}", args.output.display(), e);
        return ExitCode::FAILURE;
    }

    let mut documents: Vec<PathBuf> = match std::fs::read_dir(&args.annotations) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect(),
        Err(e) => {
            log::error!("{}: {}", args.annotations.display(), e);
            return ExitCode::FAILURE;
        }
    };
    documents.sort();

    let mut succeeded = 0usize;
    let mut failed = 0usize;
    for document in &documents {
        let stem = document
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let Some(image_path) = find_image_for(stem, &args.image) else {
            log::warn!("No image found for {:?}, skipping", document);
            continue;
        };

        let output = args.output.join(format!("{}_annotated.png", stem));
        match run_pair(document, &image_path, &output, strategy, options, args.strict) {
            Ok(()) => succeeded += 1,
            Err(e) => {
                log::error!("{}: {}", document.display(), e);
                failed += 1;
            }
        }
    }

    log::info!("Processed {} pair(s), {} failed", succeeded + failed, failed);
    if succeeded == 0 && failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Find the image sharing a stem with an annotation document.
fn find_image_for(stem: &str, image_dir: &Path) -> Option<PathBuf> {
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| image_dir.join(format!("{}.{}", stem, ext)))
        .find(|path| path.is_file())
}
