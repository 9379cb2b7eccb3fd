//! # mmdict CLI entry point
//!
//! Builds a record store from a word list, or attaches to an existing one,
//! then runs queries against it.
//!
//! ## Usage
//!
//! ```bash
//! # Build a store from /usr/share/dict/words
//! mmdict gen ./words.dict /usr/share/dict/words
//!
//! # Attach to the store and query it
//! mmdict load ./words.dict --exists cat --eq 5 --lt 99
//!
//! # Build and query in one run
//! mmdict gen ./words.dict ./list.txt --capacity 1000 --exists cat
//! ```

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use eyre::{bail, Result, WrapErr};
use mmdict::{Dictionary, DEFAULT_CAPACITY};

enum Query {
    Exists(String),
    Equal(u64),
    LessThan(u64),
    GreaterThan(u64),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let action = args[1].as_str();
    match action {
        "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-v" => {
            println!("mmdict {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "gen" | "load" => {}
        other => bail!("unknown action: {} (expected 'gen' or 'load')", other),
    }

    let mut capacity = DEFAULT_CAPACITY;
    let mut queries = Vec::new();
    let mut positional: Vec<PathBuf> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--capacity" => {
                capacity = flag_value(&args, &mut i)?
                    .parse()
                    .wrap_err("--capacity expects a slot count")?;
            }
            "--exists" => {
                queries.push(Query::Exists(flag_value(&args, &mut i)?.to_string()));
            }
            "--eq" => {
                queries.push(Query::Equal(parse_length(&args, &mut i, "--eq")?));
            }
            "--lt" => {
                queries.push(Query::LessThan(parse_length(&args, &mut i, "--lt")?));
            }
            "--gt" => {
                queries.push(Query::GreaterThan(parse_length(&args, &mut i, "--gt")?));
            }
            arg if arg.starts_with('-') => {
                bail!("unknown option: {}", arg);
            }
            path => positional.push(PathBuf::from(path)),
        }
        i += 1;
    }

    let dict = match action {
        "gen" => {
            let [store_path, list_path] = positional.as_slice() else {
                bail!("gen expects <store-file> <word-list>");
            };

            let mut dict = Dictionary::create(store_path, capacity)
                .wrap_err_with(|| format!("failed to create store at {store_path:?}"))?;
            let source = File::open(list_path)
                .wrap_err_with(|| format!("failed to open word list {list_path:?}"))?;
            let count = dict
                .generate(BufReader::new(source))
                .wrap_err_with(|| format!("failed to generate store from {list_path:?}"))?;

            println!("{} words written to {}", count, store_path.display());
            dict
        }
        _ => {
            let [store_path] = positional.as_slice() else {
                bail!("load expects <store-file>");
            };

            Dictionary::load(store_path, capacity)
                .wrap_err_with(|| format!("failed to load store at {store_path:?}"))?
        }
    };

    for query in &queries {
        match query {
            Query::Exists(word) => {
                if dict.exists(word) {
                    println!("{word}: found");
                } else {
                    println!("{word}: not found");
                }
            }
            Query::Equal(n) => {
                println!("{} words of length {}", dict.count_length_equal(*n), n);
            }
            Query::LessThan(n) => {
                println!("{} words shorter than {}", dict.count_length_less_than(*n), n);
            }
            Query::GreaterThan(n) => {
                println!("{} words longer than {}", dict.count_length_greater_than(*n), n);
            }
        }
    }

    dict.close().wrap_err("failed to close dictionary")?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => bail!("{} expects a value", flag),
    }
}

fn parse_length(args: &[String], i: &mut usize, flag: &str) -> Result<u64> {
    flag_value(args, i)?
        .parse()
        .wrap_err_with(|| format!("{flag} expects a length"))
}

fn print_usage() {
    println!("mmdict - memory-mapped word dictionary");
    println!();
    println!("USAGE:");
    println!("    mmdict gen <STORE_FILE> <WORD_LIST> [OPTIONS]");
    println!("    mmdict load <STORE_FILE> [OPTIONS]");
    println!();
    println!("ACTIONS:");
    println!("    gen     Build a store from a newline-delimited word list");
    println!("    load    Attach to an existing store");
    println!();
    println!("OPTIONS:");
    println!("    --capacity N    Store slot count (default {DEFAULT_CAPACITY})");
    println!("    --exists WORD   Report whether WORD is in the dictionary");
    println!("    --eq N          Count words of length N");
    println!("    --lt N          Count words shorter than N");
    println!("    --gt N          Count words longer than N");
    println!("    -h, --help      Print help information");
    println!("    -v, --version   Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    mmdict gen ./words.dict /usr/share/dict/words");
    println!("    mmdict load ./words.dict --exists cat --eq 5");
}
