use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use symptom_matcher_lib::config;
use symptom_matcher_lib::pipeline::symptom_extraction::{
    load_notes_file, load_options_file, load_vocabulary_file, section_aware_metadata, BatchRunner,
    ExtractionOptions, ExtractionReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "symptom-matcher",
    version,
    about = "Extract symptom mentions from clinical notes against a vocabulary."
)]
struct Args {
    /// JSON array of notes ({patient_id, note_id, text, service_date}).
    #[arg(short, long, required_unless_present = "show_version")]
    notes: Option<PathBuf>,

    /// JSON array of vocabulary entries ({id, phrase, diagnosis, ...}).
    #[arg(short, long, required_unless_present = "show_version")]
    vocabulary: Option<PathBuf>,

    /// JSON options file. Falls back to $SYMPTOM_MATCHER_OPTIONS.
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Build the organized index.
    #[arg(long)]
    debug: bool,

    #[arg(long)]
    no_word_boundaries: bool,

    #[arg(long)]
    no_negation: bool,

    #[arg(long)]
    min_phrase_length: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print engine metadata and exit.
    #[arg(long)]
    show_version: bool,
}

impl Args {
    fn resolve_options(&self) -> anyhow::Result<ExtractionOptions> {
        let path = self
            .options
            .clone()
            .or_else(|| std::env::var_os(config::OPTIONS_ENV_VAR).map(PathBuf::from));

        let mut options = match path {
            Some(path) => load_options_file(&path)
                .with_context(|| format!("Could not load options from {:?}", path))?,
            None => ExtractionOptions::default(),
        };

        if self.debug {
            options.debug = true;
        }
        if self.no_word_boundaries {
            options.use_word_boundaries = false;
        }
        if self.no_negation {
            options.consider_negation = false;
        }
        if let Some(min) = self.min_phrase_length {
            options.min_phrase_length = min;
        }
        Ok(options)
    }
}

fn main() -> anyhow::Result<()> {
    symptom_matcher_lib::init_tracing();
    let args = Args::parse();
    print!("{}", run(&args)?);
    Ok(())
}

/// Everything `main` prints to stdout.
fn run(args: &Args) -> anyhow::Result<String> {
    // Metadata does not depend on options, so a broken options file must not block it.
    if args.show_version {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&section_aware_metadata())?));
    }

    let options = args.resolve_options()?;
    let runner = BatchRunner::section_aware(options)?;

    let (Some(notes_path), Some(vocabulary_path)) = (&args.notes, &args.vocabulary) else {
        anyhow::bail!("--notes and --vocabulary are required");
    };

    let notes = load_notes_file(notes_path)
        .with_context(|| format!("Could not read notes from {:?}", notes_path))?;
    let vocabulary = load_vocabulary_file(vocabulary_path)
        .with_context(|| format!("Could not read vocabulary from {:?}", vocabulary_path))?;

    let result = runner.extract(&notes, &vocabulary);

    Ok(match args.format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => ExtractionReport::from_result(&result).render_text(),
    })
}
