use clap::Parser;

use dfasat_rs::apta::Sample;
use dfasat_rs::solver::Splr;
use dfasat_rs::synth::{synthesize_within, Synthesis};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Smallest number of states to try.
    #[clap(long, value_name = "INT", default_value = "1")]
    lower: u32,

    /// Largest number of states to try.
    #[clap(long, value_name = "INT", default_value = "6")]
    upper: u32,

    /// Print the synthesized automaton in DOT (Graphviz) format.
    #[clap(long)]
    dot: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // The sample from Heule & Verwer (2013). Its smallest consistent
    // automaton has 3 states.
    let sample = Sample::new(
        vec![vec!['a'], vec!['a', 'b', 'a', 'a'], vec!['b', 'b']],
        vec![vec!['a', 'b', 'b'], vec!['b']],
    );
    println!("positive traces: {:?}", sample.positive);
    println!("negative traces: {:?}", sample.negative);

    let mut solver = Splr;
    match synthesize_within(&sample, args.lower..=args.upper, &mut solver)? {
        Synthesis::Dfa(dfa) => {
            println!("synthesized a DFA with {} states", dfa.num_states());
            println!("initial state: {}", dfa.initial_state());
            println!("accepting states: {:?}", dfa.accepting_states());

            let mut transitions: Vec<_> = dfa.transitions().iter().collect();
            transitions.sort_by_key(|((from, symbol), _)| (*from, *symbol));
            for ((from, symbol), to) in transitions {
                println!("  {} --{:?}--> {}", from, symbol, to);
            }

            for trace in sample.positive.iter().chain(sample.negative.iter()) {
                println!("label({:?}) = {}", trace, dfa.label(trace));
            }

            if args.dot {
                println!("{}", dfa.to_dot()?);
            }
        }
        Synthesis::NoModelFound => {
            println!("no model found within {}..={} states", args.lower, args.upper);
        }
    }

    Ok(())
}
