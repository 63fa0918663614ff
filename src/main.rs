/// Command-line checker for YOLO label files.
///
/// Loads `labels.txt` against the pixel size of `image` through the same
/// annotator the browser uses, reports skipped lines, and prints the
/// canonical re-export (or the boxes in pixels with `--json`).
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::error::Error;
    use std::path::PathBuf;

    use urchin_annotator::format::class_names_from_text;
    use urchin_annotator::urchin_canvas::{RecordingSurface, Surface};
    use urchin_annotator::{Annotator, AnnotatorConfig};

    const USAGE: &str = "Usage: urchin-annotate <image> <labels.txt> \
                         [--config cfg.json] [--classes classes.txt] [--json]";

    struct Args {
        image: PathBuf,
        labels: PathBuf,
        config: Option<PathBuf>,
        classes: Option<PathBuf>,
        json: bool,
    }

    fn parse_args() -> Result<Args, String> {
        let mut positional = Vec::new();
        let mut config = None;
        let mut classes = None;
        let mut json = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--json" => json = true,
                "--config" => {
                    let path = args.next().ok_or("--config needs a path")?;
                    config = Some(PathBuf::from(path));
                }
                "--classes" => {
                    let path = args.next().ok_or("--classes needs a path")?;
                    classes = Some(PathBuf::from(path));
                }
                "-h" | "--help" => return Err(USAGE.to_string()),
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option '{}'\n{}", flag, USAGE));
                }
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let [image, labels]: [PathBuf; 2] = positional
            .try_into()
            .map_err(|_| USAGE.to_string())?;
        Ok(Args {
            image,
            labels,
            config,
            classes,
            json,
        })
    }

    /// Boxes per class id. Ids outside the class list are kept apart.
    #[derive(Debug, Default, PartialEq)]
    pub(crate) struct ClassCounts {
        /// Indexed by class id
        pub known: Vec<usize>,
        pub unknown: BTreeMap<u32, usize>,
    }

    pub(crate) fn class_counts<S: Surface>(annotator: &Annotator<S>) -> ClassCounts {
        let mut counts = ClassCounts {
            known: vec![0; annotator.classes().len()],
            unknown: BTreeMap::new(),
        };
        for bbox in annotator.boxes().iter() {
            match counts.known.get_mut(bbox.class_id as usize) {
                Some(count) => *count += 1,
                None => *counts.unknown.entry(bbox.class_id).or_default() += 1,
            }
        }
        counts
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = parse_args()?;

        let mut config = match &args.config {
            Some(path) => AnnotatorConfig::load(path)?,
            None => AnnotatorConfig::load_from_default_path().unwrap_or_default(),
        };
        env_logger::Builder::new()
            .filter_level(config.log_level.to_level_filter())
            .parse_default_env()
            .init();

        if let Some(path) = &args.classes {
            config.classes = class_names_from_text(&std::fs::read_to_string(path)?);
            log::info!("Using {} classes from {:?}", config.classes.len(), path);
        }

        let (width, height) = image::image_dimensions(&args.image)?;
        log::info!("{:?}: {}x{}", args.image, width, height);

        let text = std::fs::read_to_string(&args.labels)?;
        let surface = RecordingSurface::new(width as f64, height as f64);
        let mut annotator = Annotator::with_config(surface, &config);
        let summary = annotator.load_from_normalized_text(&text)?;

        for skipped in &summary.skipped {
            eprintln!(
                "{}:{}: skipped '{}': {}",
                args.labels.display(),
                skipped.line_number,
                skipped.content,
                skipped.reason
            );
        }
        eprintln!(
            "{} boxes loaded, {} lines skipped",
            summary.loaded,
            summary.skipped.len()
        );
        let counts = class_counts(&annotator);
        for (class, count) in annotator.classes().iter().zip(&counts.known) {
            eprintln!("  {}: {}", class.name, count);
        }
        for (class_id, count) in &counts.unknown {
            eprintln!("  unknown class {}: {}", class_id, count);
        }

        if args.json {
            println!("{}", annotator.export_to_json()?);
        } else {
            println!("{}", annotator.export_to_normalized_text()?);
        }
        Ok(())
    }

}
