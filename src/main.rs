//! GTSPLIB Reader - Command Line Interface
//!
//! Loads a TSPLIB/GTSPLIB instance and prints what was read.

use clap::{Parser, Subcommand};
use gtsplib_reader::ProblemInstance;

use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "gtsplib-info")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Inspect TSPLIB and GTSPLIB problem instances")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print an overview of an instance
    Info {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Tour files to add to the instance (TYPE : TOUR)
        #[arg(short, long)]
        tour: Vec<PathBuf>,

        /// Print the whole parsed instance as JSON
        #[arg(long)]
        json: bool,

        /// Also list the clusters of GTSP instances
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the distance between two nodes (1-based, as in the file)
    Distance {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        #[arg(long)]
        from: usize,

        #[arg(long)]
        to: usize,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { instance, tour, json, verbose } => {
            show_instance(&instance, &tour, json, verbose);
        }

        Commands::Distance { instance, from, to } => {
            show_distance(&instance, from, to);
        }
    }
}

fn load_instance(path: &Path) -> ProblemInstance {
    let start = Instant::now();
    match ProblemInstance::from_file(path) {
        Ok(instance) => {
            log::info!("loaded {:?} in {:.3}s", path, start.elapsed().as_secs_f64());
            instance
        }
        Err(e) => {
            eprintln!("Error loading instance: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_instance(path: &Path, tours: &[PathBuf], json: bool, verbose: bool) {
    let mut instance = load_instance(path);

    for tour in tours {
        if let Err(e) = instance.add_tours_from_file(tour) {
            eprintln!("Error adding tours from {:?}: {}", tour, e);
            std::process::exit(1);
        }
    }

    if json {
        match serde_json::to_string_pretty(&instance) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing instance: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", instance.summary());

    if let Some(comment) = instance.comment() {
        println!("\nComment:");
        for line in comment.lines() {
            println!("  {}", line);
        }
    }

    for (k, tour) in instance.tours().iter().enumerate() {
        println!("Tour {}: {} nodes", k + 1, tour.size());
    }

    if verbose {
        if let Some(clusters) = instance.clusters() {
            for (k, set) in clusters.sets().iter().enumerate() {
                let nodes: Vec<String> = set.iter().map(|n| n.to_string()).collect();
                println!("Cluster {}: {}", k + 1, nodes.join(" "));
            }
        }
    }
}

fn show_distance(path: &Path, from: usize, to: usize) {
    let instance = load_instance(path);

    match instance.distance(from, to) {
        Ok(d) => println!("{}", d),
        Err(e) => {
            eprintln!("Error computing distance: {}", e);
            std::process::exit(1);
        }
    }
}
