use std::{
    env,
    fs::read_to_string,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use lexis::{
    errors::errors::{Error, ErrorTip},
    get_line_at_position, init_tracing,
    lexer::lexer::Lexer,
};

const RETAIN_WHITESPACE: &str = "--retain-whitespace";

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let retain_whitespace = args.iter().any(|arg| arg == RETAIN_WHITESPACE);
    let mut positional = args.iter().filter(|arg| *arg != RETAIN_WHITESPACE);

    let Some(file_path) = positional.next() else {
        eprintln!("Usage: lexis <file> [--retain-whitespace] [keyword ...]");
        return ExitCode::FAILURE;
    };
    let keywords: Vec<&String> = positional.collect();

    let file = PathBuf::from(file_path);
    let source = match read_to_string(&file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut lexer = Lexer::builder()
        .with_keywords(keywords.into_iter().cloned())
        .retain_whitespace(retain_whitespace)
        .build();

    let start = Instant::now();
    let mut errors = vec![];
    let mut count = 0;

    for (token, error) in lexer.iterate(&source) {
        println!("{}", token);
        count += 1;

        if let Some(error) = error {
            errors.push(error);
        }
    }

    println!("Tokenized {} tokens in {:?}", count, start.elapsed());

    for error in &errors {
        display_error(error, &file, &source);
    }

    if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn display_error(error: &Error, file: &Path, source: &str) {
    /*
        Error: name (tip)
        -> file.txt
           |
         2 | let a = §;
           | --------^
    */

    let (line, line_text, line_pos) = get_line_at_position(source, error.get_cursor());

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("   {}", error.message());
    println!("-> {}", file.as_os_str().to_string_lossy());
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (string.chars().skip(start).collect(), start)
}
