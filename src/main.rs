//! linearb CLI: Linear B transcription and Mycenaean Greek analysis.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use linear_b::categories::{Gender, PartOfSpeech};
use linear_b::engine::{Analyzer, AnalyzerConfig};
use linear_b::error::LinearBError;
use linear_b::morphology::MorphologicalAnalysis;
use linear_b::paradigm::{Features, InflectedForm};
use linear_b::phonology::{ChangeType, DiachronicPath};

#[derive(Parser)]
#[command(name = "linearb", version, about = "Linear B and Mycenaean Greek analyzer")]
struct Cli {
    /// Directory with signs.toml, lexicon.toml, paradigms.toml and
    /// sound_changes.toml. Defaults to the bundled tables.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logging.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe Linear B text into hyphenated transliteration.
    Transcribe {
        /// Text in the Linear B Unicode blocks.
        text: String,
    },

    /// Segment transliterated words into stem and ending.
    Analyze {
        /// Transliterations, e.g. wa-na-ka-te.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Generate the inflectional paradigm of a stem.
    Paradigm {
        /// Stem, e.g. wanak.
        stem: String,

        /// Part of speech.
        #[arg(long, default_value = "noun")]
        pos: PartOfSpeech,

        /// Declension template name.
        #[arg(long)]
        declension: Option<String>,

        #[arg(long)]
        gender: Option<Gender>,

        /// Attested forms (comma-separated). Defaults to the lexicon's list;
        /// pass `--attested=` for none.
        #[arg(long, value_delimiter = ',')]
        attested: Option<Vec<String>>,
    },

    /// Trace sound changes from a Mycenaean to a Classical form.
    Diachronic { mycenaean: String, classical: String },

    /// Transcribe, analyze and trace every word of a text.
    Full { text: String },

    /// List the lexicon.
    Lexicon,

    /// List sound-change rules in application order.
    Rules {
        /// Only rules of this change type, e.g. loss or merger.
        #[arg(long = "type")]
        change_type: Option<ChangeType>,
    },

    /// Show table statistics.
    Info,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let analyzer = Analyzer::new(AnalyzerConfig {
        data_dir: cli.data_dir.clone(),
    })?;
    let json = cli.json;

    match cli.command {
        Commands::Transcribe { text } => {
            require("text", &text)?;
            let words = analyzer.transcribe(&text);
            if json {
                return print_json(&words);
            }
            if words.is_empty() {
                println!("No Linear B words found.");
            }
            for word in &words {
                println!(
                    "{}  {}  /{}/  ({} syllables)",
                    word.original, word.transliteration, word.phonetic, word.syllable_count
                );
            }
        }

        Commands::Analyze { words } => {
            for word in &words {
                require("word", word)?;
            }
            let results = analyzer.analyze_words(words.as_slice());
            if json {
                let by_word: Vec<_> = words
                    .iter()
                    .zip(&results)
                    .map(|(word, analyses)| WordAnalyses { word, analyses })
                    .collect();
                return print_json(&by_word);
            }
            for (word, analyses) in words.iter().zip(&results) {
                println!("{word}:");
                for analysis in analyses {
                    println!("  {}", format_analysis(analysis));
                }
            }
        }

        Commands::Paradigm {
            stem,
            pos,
            declension,
            gender,
            attested,
        } => {
            require("stem", &stem)?;
            let attested: Option<Vec<String>> = attested.map(|forms| {
                forms.into_iter().filter(|f| !f.trim().is_empty()).collect()
            });
            let forms =
                analyzer.paradigm(&stem, pos, declension.as_deref(), gender, attested.as_deref());
            if json {
                return print_json(&forms);
            }
            if forms.is_empty() {
                println!("No paradigm for part of speech \"{pos}\".");
            }
            for form in &forms {
                println!("{}", format_form(form));
            }
        }

        Commands::Diachronic {
            mycenaean,
            classical,
        } => {
            require("mycenaean", &mycenaean)?;
            require("classical", &classical)?;
            let path = analyzer.diachronic(&mycenaean, &classical);
            if json {
                return print_json(&path);
            }
            print_path(&path);
        }

        Commands::Full { text } => {
            require("text", &text)?;
            let words = analyzer.full_analysis(&text);
            if json {
                return print_json(&words);
            }
            for word in &words {
                println!(
                    "{}  {}",
                    word.transcription.original, word.transcription.transliteration
                );
                println!("  {}", format_analysis(&word.analysis));
                if let Some(path) = &word.diachronic {
                    print_path(path);
                }
            }
        }

        Commands::Lexicon => {
            let entries = analyzer.lexicon();
            if json {
                return print_json(&entries);
            }
            println!("Lexicon ({} entries):", entries.len());
            for entry in &entries {
                let classical = entry.classical_form.as_deref().unwrap_or("-");
                println!(
                    "  {:<14} {:<12} {:<8} {} → {}",
                    entry.key, entry.part_of_speech, entry.stem, entry.meaning, classical
                );
            }
        }

        Commands::Rules { change_type } => {
            let rules = analyzer.rules(change_type);
            if json {
                return print_json(&rules);
            }
            for (i, rule) in rules.iter().enumerate() {
                println!(
                    "  {}. {} [{}] {} → {} / {}  ({})",
                    i + 1,
                    rule.name,
                    rule.change_type,
                    rule.source_pattern,
                    rule.target_display(),
                    rule.environment,
                    rule.period
                );
            }
        }

        Commands::Info => {
            let info = analyzer.info();
            if json {
                return print_json(&info);
            }
            println!("{info}");
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct WordAnalyses<'a> {
    word: &'a str,
    analyses: &'a [MorphologicalAnalysis],
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LinearBError::invalid_request(field).into());
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

fn format_analysis(analysis: &MorphologicalAnalysis) -> String {
    let reading = match (analysis.case, analysis.number) {
        (Some(case), Some(number)) => format!("{case} {number}"),
        _ => "unanalyzed".to_string(),
    };
    let ending = if analysis.ending.is_empty() {
        "∅"
    } else {
        &analysis.ending
    };
    format!(
        "{} + {}  {}  [{}] ({:.1})",
        analysis.stem,
        ending,
        reading,
        analysis.declension.as_deref().unwrap_or("-"),
        analysis.confidence
    )
}

fn format_form(form: &InflectedForm) -> String {
    let cell = match &form.features {
        Features::Nominal { case, number, .. } => format!("{case} {number}"),
        Features::Verbal {
            tense,
            person,
            number,
            ..
        } => format!("{tense} {person} {number}"),
    };
    let marker = if form.attested { "attested" } else { "reconstructed" };
    format!(
        "  {:<24} {:<14} *{:<12} {marker}",
        cell, form.surface_form, form.reconstruction
    )
}

fn print_path(path: &DiachronicPath) {
    println!("  {} → {}", path.mycenaean, path.classical);
    for stage in &path.stages {
        println!("    {:<12} {:<16} {}", stage.form, stage.period, stage.label);
    }
    for rule in &path.applied_rules {
        println!("    • {}: {}", rule.name, rule.description);
    }
}
