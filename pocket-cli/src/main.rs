use std::time::Duration;

use pocket_sim::{Device, Input, Key, Output};

use anyhow::{anyhow, Result};
use clap::Parser;
use log::{debug, info};

/// Replays keys against a simulated pocket console
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Simulated time between keys, in milliseconds
    #[clap(long, default_value_t = 300)]
    step_ms: u64,

    /// Run the boot sequence to completion before the first key
    #[clap(long)]
    settle: bool,

    /// Keys to press: up, down, left, right, enter, space, esc, backspace,
    /// or single characters
    keys: Vec<String>,
}

fn show(out: &Output) {
    if out.view.flicker {
        println!("[{:?}] ~~~", out.screen);
    } else {
        println!("[{:?}]", out.screen);
        print!("{}", out.view.to_text());
    }
    println!();
}

fn main() -> Result<()> {
    let env = env_logger::Env::default()
        .filter_or("POCKET_LOG", "info")
        .write_style_or("POCKET_LOG", "always");
    env_logger::init_from_env(env);

    let args = Args::parse();
    let keys = args
        .keys
        .iter()
        .map(|s| {
            Key::from_name(s).ok_or_else(|| anyhow!("unknown key {s:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut now = Duration::ZERO;
    let mut dev = Device::new(now);
    if args.settle {
        while !dev.booted() {
            let Some(t) = dev.next_deadline() else {
                break;
            };
            now = t;
            let out = dev.update(now, Input::default());
            for c in out.cues {
                info!("cue: {c:?}");
            }
        }
        debug!("settled at {now:?}");
    }
    show(&dev.update(now, Input::default()));

    let step = Duration::from_millis(args.step_ms);
    for k in keys {
        let out = dev.update(now, Input::key(k));
        for c in out.cues {
            info!("cue: {c:?}");
        }
        now += step;
        let out = dev.update(now, Input::default());
        for c in out.cues.iter() {
            info!("cue: {c:?}");
        }
        println!("> {k:?}");
        show(&out);
    }

    Ok(())
}
