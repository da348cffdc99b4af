// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use cropit_core::{AspectRatio, Handle, Size};

use crate::config::parse_size;

#[derive(Debug, Parser)]
#[command(name = "cropit", version, about = "Crop an image and hand it off.")]
pub struct Args {
    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/cropit/cropit.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Override config path (default: $XDG_CONFIG_HOME/cropit/cropit.rune)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Crop an image, then save and/or upload the result
    Crop {
        /// Source image
        image: PathBuf,

        /// Available display area, e.g. 800x600
        #[arg(long, value_parser = parse_size)]
        container: Option<Size>,

        /// Ratio lock: free, original, square, W:H or a number
        #[arg(long)]
        aspect: Option<AspectRatio>,

        /// Mask the crop to a circle (PNG output)
        #[arg(long)]
        circle: bool,

        /// Pointer step, repeatable: <handle>:<dx>,<dy> | container:WxH | reset
        #[arg(long = "step")]
        steps: Vec<Step>,

        /// Abandon the crop after the steps: nothing is written or uploaded
        #[arg(long, conflicts_with_all = ["out", "upload"])]
        cancel: bool,

        /// Write the crop here (default: output directory from config)
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,

        /// Send the crop to the upload endpoint
        #[arg(long)]
        upload: bool,

        /// Upload endpoint (overrides config)
        #[arg(long)]
        endpoint: Option<String>,

        /// Bearer token (overrides $CROPIT_TOKEN and config)
        #[arg(long)]
        token: Option<String>,

        /// Image url the host field currently holds
        #[arg(long, default_value = "")]
        current_image: String,
    },

    /// Clear the host field's image (reports an empty url)
    Remove {
        /// Image url the host field currently holds
        #[arg(long, default_value = "")]
        current_image: String,
    },

    /// Show how an image would be laid out for cropping
    Inspect {
        image: PathBuf,

        #[arg(long, value_parser = parse_size)]
        container: Option<Size>,

        #[arg(long)]
        aspect: Option<AspectRatio>,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Drag { handle: Handle, dx: f64, dy: f64 },
    Container(Size),
    Reset,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("reset") {
            return Ok(Step::Reset);
        }

        let (head, tail) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <handle>:<dx>,<dy>, container:WxH or reset, got \"{s}\""))?;

        if head.trim().eq_ignore_ascii_case("container") {
            return parse_size(tail).map(Step::Container);
        }

        let handle: Handle = head.parse()?;
        let (dx, dy) = tail
            .split_once(',')
            .ok_or_else(|| format!("expected <dx>,<dy> after \"{head}:\", got \"{tail}\""))?;
        let dx: f64 = dx.trim().parse().map_err(|_| format!("invalid dx \"{dx}\""))?;
        let dy: f64 = dy.trim().parse().map_err(|_| format!("invalid dy \"{dy}\""))?;

        Ok(Step::Drag { handle, dx, dy })
    }
}
