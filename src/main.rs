//! Native demo driver for the image-map widget.
//!
//! Loads a configuration file, probes the map and marker images for
//! their natural sizes, then maps line-oriented stdin commands to
//! widget messages and prints the resulting effects.

use std::io::{BufRead, Write};

use pinmap::resource::probe_image_size;
use pinmap::{
    ApparentBox, ClickPoint, ClickTarget, Effect, ImageSize, MapConfig, MapWidget, Message,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .ok_or("usage: pinmap <config.json>")?;
    let json = std::fs::read_to_string(&config_path)?;
    let config = MapConfig::from_json(&json)?;

    let map_size = probe_image_size(&config.map_resource)?;
    let marker_size = probe_image_size(&config.marker_resource)?;

    let mut widget = MapWidget::new(config);
    apply(&mut widget, Message::MapResourceReady(map_size));
    apply(&mut widget, Message::MarkerResourceReady(marker_size));

    println!("PinMap demo - map {}x{}", map_size.width, map_size.height);
    print_help();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        if line == "help" {
            print_help();
            continue;
        }
        if line == "list" {
            println!("{}", widget.selection().to_json()?);
            continue;
        }

        match parse_command(line, map_size) {
            Some(message) => apply(&mut widget, message),
            None => println!("unrecognized command, try 'help'"),
        }
    }

    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  toggle <id>            click a region's hit zone");
    println!("  capture <x> <y> <w> <h>  admin click at (x,y) in a WxH rendered box");
    println!("  remove <id>            admin click on an authored spot");
    println!("  search <text>          filter the naming combo-box");
    println!("  choose <id>            pick a combo-box candidate");
    println!("  save | cancel          confirm or dismiss the naming dialog");
    println!("  reset | yes | no       reset flow and confirmation answers");
    println!("  list | help | quit");
}

fn parse_command(line: &str, map_size: ImageSize) -> Option<Message> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?;
    let args: Vec<&str> = parts.collect();

    match command {
        "toggle" => Some(Message::MapClicked {
            target: ClickTarget::Area(args.first()?.parse().ok()?),
            position: ClickPoint::new(0.0, 0.0),
            bounds: ApparentBox::new(map_size.width, map_size.height),
        }),
        "capture" => {
            let values: Vec<f32> = args.iter().filter_map(|a| a.parse().ok()).collect();
            let [x, y, w, h] = values.as_slice() else {
                return None;
            };
            Some(Message::MapClicked {
                target: ClickTarget::Background,
                position: ClickPoint::new(*x, *y),
                bounds: ApparentBox::new(*w, *h),
            })
        }
        "remove" => Some(Message::MapClicked {
            target: ClickTarget::Spot(args.first()?.parse().ok()?),
            position: ClickPoint::new(0.0, 0.0),
            bounds: ApparentBox::new(map_size.width, map_size.height),
        }),
        "search" => Some(Message::SearchChanged(args.join(" "))),
        "choose" => Some(Message::CandidateChosen(args.first()?.parse().ok()?)),
        "save" => Some(Message::SpotSaved),
        "cancel" => Some(Message::SpotCancelled),
        "reset" => Some(Message::ResetRequested),
        "yes" => Some(Message::ResetDecision(true)),
        "no" => Some(Message::ResetDecision(false)),
        _ => None,
    }
}

fn apply(widget: &mut MapWidget, message: Message) {
    match widget.update(message) {
        Ok(effects) => {
            for effect in &effects {
                describe(widget, effect);
            }
            if let Some(combo) = widget.capture().combo() {
                let names: Vec<&str> = combo.filtered().iter().map(|c| c.name.as_str()).collect();
                println!("  candidates: {}", names.join(", "));
            }
        }
        Err(e) => println!("  rejected: {e}"),
    }
}

fn describe(widget: &MapWidget, effect: &Effect) {
    match effect {
        Effect::SelectionChanged(payload) => {
            let json = serde_json::to_string(payload).unwrap_or_else(|_| "[]".to_string());
            println!("  selection -> {json}");
        }
        Effect::LayoutChanged(layout) => {
            println!(
                "  layout: {} zones over a {}x{} canvas",
                layout.areas.len(),
                layout.canvas_max.width,
                layout.canvas_max.height
            );
        }
        Effect::ShowMarker { id, placement } => {
            println!(
                "  show marker {id} at left {:.2}% top {:.2}% width {:.2}%",
                placement.left_pct, placement.top_pct, placement.width_pct
            );
        }
        Effect::HideMarker { id } => println!("  hide marker {id}"),
        Effect::SpotAdded { id, placement } => {
            println!(
                "  spot {id} added at left {:.2}% top {:.2}%",
                placement.left_pct, placement.top_pct
            );
        }
        Effect::SpotRemoved { id } => println!("  spot {id} removed"),
        Effect::NamingDialogOpened => {
            let pending = widget.capture().pending();
            match pending {
                Some(p) => println!("  naming dialog open for ({:.1}, {:.1})", p.x, p.y),
                None => println!("  naming dialog open"),
            }
        }
        Effect::NamingDialogClosed => println!("  naming dialog closed"),
        Effect::ResetConfirmationRequested => {
            println!("  confirm reset? answer 'yes' or 'no'");
        }
    }
}
