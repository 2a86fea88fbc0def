//! Command-line interface for crf-segment
//!
//! Usage:
//!   crfseg -d <DICT> [OPTIONS] <TEXT>
//!   echo "G20峰会在杭州召开" | crfseg -d dictionary.txt
//!
//! Options:
//!   -d, --dict <FILE>         Dictionary used as tagging model and core dictionary
//!   -u, --user-dict <FILE>    User dictionary for merging words
//!   -t, --transitions <FILE>  JSON transition matrix (required by --pos)
//!   -p, --pos                 Tag parts of speech
//!   -o, --offset              Print character offsets
//!   -j, --json                Output as JSON
//!   -h, --help                Show help

use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::sync::Arc;

use crf_segment::{
    CoreDictionary, CrfSegmenter, DictionaryModelLoader, ModelPool, SegmentConfig,
    TransitionMatrix, UserDictionary, VERSION,
};
use tracing_subscriber::EnvFilter;

fn print_help() {
    eprintln!(
        r#"crfseg {} - tag-based Chinese word segmenter

USAGE:
    crfseg -d <DICT> [OPTIONS] [TEXT]
    echo "G20峰会在杭州召开" | crfseg -d dictionary.txt

OPTIONS:
    -d, --dict <FILE>         Dictionary used as tagging model and core dictionary
    -u, --user-dict <FILE>    User dictionary for merging words
    -t, --transitions <FILE>  JSON transition matrix (required by --pos)
    -p, --pos                 Tag parts of speech
    -o, --offset              Print character offsets
    -j, --json                Output as JSON
    -h, --help                Show this help message

Dictionary lines look like `word nature freq [nature freq ...]`.
Set RUST_LOG=info to see model loading.

EXAMPLES:
    crfseg -d core.txt "G20峰会在杭州召开"
    crfseg -d core.txt -u user.txt -t matrix.json -p -o "G20峰会在杭州召开"
"#,
        VERSION
    );
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => fail(format!("reading '{}': {}", path, e)),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut dict_path: Option<String> = None;
    let mut user_dict_path: Option<String> = None;
    let mut transitions_path: Option<String> = None;
    let mut config = SegmentConfig::new();
    let mut json_output = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-p" | "--pos" => {
                config.part_of_speech_tagging = true;
            }
            "-o" | "--offset" => {
                config.offset_tracking = true;
            }
            "-j" | "--json" => {
                json_output = true;
            }
            flag @ ("-d" | "--dict" | "-u" | "--user-dict" | "-t" | "--transitions") => {
                i += 1;
                let value = match args.get(i) {
                    Some(v) => v.clone(),
                    None => fail(format!("{} requires a file path", flag)),
                };
                match flag {
                    "-d" | "--dict" => dict_path = Some(value),
                    "-u" | "--user-dict" => user_dict_path = Some(value),
                    _ => transitions_path = Some(value),
                }
            }
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let dict_path = match dict_path {
        Some(p) => p,
        None => {
            eprintln!("Error: --dict is required");
            print_help();
            std::process::exit(1);
        }
    };

    // The same file backs the tagging model and the attribute lookups
    let mut segmenter =
        match CrfSegmenter::load(&dict_path, &DictionaryModelLoader, ModelPool::global()) {
            Ok(s) => s,
            Err(e) => fail(e),
        };
    match CoreDictionary::from_text(&read_file(&dict_path)) {
        Ok(core) => segmenter = segmenter.with_dictionary(Arc::new(core)),
        Err(e) => fail(e),
    }

    if let Some(path) = user_dict_path {
        match CoreDictionary::from_text(&read_file(&path)) {
            Ok(words) => {
                segmenter = segmenter.with_custom_dictionary(Arc::new(UserDictionary::new(words)));
                config.use_custom_dictionary = true;
            }
            Err(e) => fail(format!("user dictionary '{}': {}", path, e)),
        }
    }

    if let Some(path) = transitions_path {
        match TransitionMatrix::from_json(&read_file(&path)) {
            Ok(matrix) => segmenter = segmenter.with_transition_matrix(Arc::new(matrix)),
            Err(e) => fail(format!("transition matrix '{}': {}", path, e)),
        }
    }

    // Read from stdin if no text provided
    let lines: Vec<String> = if let Some(t) = text {
        vec![t]
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => fail(format!("reading stdin: {}", e)),
            }
        }
        lines
    };

    if lines.iter().all(|l| l.is_empty()) {
        eprintln!("Error: No input text provided");
        print_help();
        std::process::exit(1);
    }

    for line in &lines {
        let terms = match segmenter.seg(line, &config) {
            Ok(t) => t,
            Err(e) => fail(e),
        };

        if json_output {
            match serde_json::to_string(&terms) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(format!("serializing to JSON: {}", e)),
            }
        } else {
            let rendered: Vec<String> = terms
                .iter()
                .map(|term| match term.offset {
                    Some(offset) => format!("{}@{}", term, offset),
                    None => term.to_string(),
                })
                .collect();
            println!("{}", rendered.join(" "));
        }
    }
}
