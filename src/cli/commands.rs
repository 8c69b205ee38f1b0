use std::path::PathBuf;

use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};

use minerpet::core::{EmotionalState, Interaction};
use minerpet::physics::Gesture;

#[derive(Parser)]
#[command(name = "minerpet")]
#[command(about = "Virtual pet engine for mining companions")]
#[command(version)]
pub struct Args {
    /// Directory holding config.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the traits generated from an address
    Traits {
        /// Pet address (hex, 0x prefix optional)
        address: String,
        /// Print JSON instead of a formatted view
        #[arg(long)]
        json: bool,
    },
    /// Derive the full pet state at one instant
    Status {
        #[arg(long)]
        address: String,
        /// Creation time (unix seconds or RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        created_at: i64,
        #[arg(long, value_parser = parse_timestamp)]
        last_fed: i64,
        #[arg(long, value_parser = parse_timestamp)]
        last_interaction: i64,
        /// Defaults to the current time
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<i64>,
        /// A transaction is awaiting confirmation
        #[arg(long)]
        tx_pending: bool,
        #[arg(long, value_parser = parse_timestamp)]
        last_success: Option<i64>,
        #[arg(long, value_parser = parse_timestamp)]
        session_started: Option<i64>,
        /// Last breeding time, for the cooldown check
        #[arg(long, value_parser = parse_timestamp)]
        last_bred: Option<i64>,
        /// Mood shown when no rule applies
        #[arg(long, value_enum, default_value_t = FallbackArg::Idle)]
        fallback: FallbackArg,
        #[arg(long)]
        json: bool,
    },
    /// Apply a care action and print the resulting stats
    Interact {
        #[arg(value_enum)]
        action: InteractionArg,
        #[arg(long)]
        address: String,
        #[arg(long, value_parser = parse_timestamp)]
        last_fed: i64,
        #[arg(long, value_parser = parse_timestamp)]
        last_interaction: i64,
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<i64>,
    },
    /// Preview possible offspring of two pets
    Breed {
        #[arg(long)]
        parent_a: String,
        #[arg(long)]
        parent_b: String,
        #[arg(long, default_value = "0")]
        gen_a: u32,
        #[arg(long, default_value = "0")]
        gen_b: u32,
        #[arg(long, default_value = "5")]
        count: usize,
        /// Fix the RNG seed for reproducible previews
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        json: bool,
    },
    /// Session earnings, daily rate and next milestone
    Earnings {
        /// Balance when the session started
        #[arg(long)]
        initial: String,
        /// Balance now
        #[arg(long)]
        current: String,
        /// Mining rate in tokens per second
        #[arg(long, default_value = "0")]
        rate: f64,
        /// Seconds the rate has been sampled for
        #[arg(long, default_value = "0")]
        elapsed: f64,
        /// Pet age, for retirement information
        #[arg(long)]
        age_days: Option<u32>,
        /// Balances are on-chain integer amounts
        #[arg(long)]
        base_units: bool,
        #[arg(long)]
        json: bool,
    },
    /// Run the animator and print one JSON frame per line
    Animate {
        /// Emotional state to render
        #[arg(long, value_enum, default_value_t = EmotionArg::Idle)]
        state: EmotionArg,
        #[arg(long, value_enum)]
        gesture: Option<GestureArg>,
        #[arg(long, default_value = "120")]
        frames: u64,
        #[arg(long, default_value = "60")]
        fps: u32,
    },
    /// Show the active configuration
    Config {
        /// Write the defaults to config.json, replacing the existing file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InteractionArg {
    Feed,
    Play,
    Pet,
    Poke,
}

impl From<InteractionArg> for Interaction {
    fn from(arg: InteractionArg) -> Self {
        match arg {
            InteractionArg::Feed => Interaction::Feed,
            InteractionArg::Play => Interaction::Play,
            InteractionArg::Pet => Interaction::Pet,
            InteractionArg::Poke => Interaction::Poke,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GestureArg {
    Bounce,
    Wiggle,
    Jump,
    Spin,
    Nod,
}

impl From<GestureArg> for Gesture {
    fn from(arg: GestureArg) -> Self {
        match arg {
            GestureArg::Bounce => Gesture::Bounce,
            GestureArg::Wiggle => Gesture::Wiggle,
            GestureArg::Jump => Gesture::Jump,
            GestureArg::Spin => Gesture::Spin,
            GestureArg::Nod => Gesture::Nod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmotionArg {
    Idle,
    Happy,
    Excited,
    Hungry,
    Sleeping,
    Dead,
    Bored,
    Petting,
}

impl From<EmotionArg> for EmotionalState {
    fn from(arg: EmotionArg) -> Self {
        match arg {
            EmotionArg::Idle => EmotionalState::Idle,
            EmotionArg::Happy => EmotionalState::Happy,
            EmotionArg::Excited => EmotionalState::Excited,
            EmotionArg::Hungry => EmotionalState::Hungry,
            EmotionArg::Sleeping => EmotionalState::Sleeping,
            EmotionArg::Dead => EmotionalState::Dead,
            EmotionArg::Bored => EmotionalState::Bored,
            EmotionArg::Petting => EmotionalState::Petting,
        }
    }
}

/// Moods driven by gestures or messages rather than the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FallbackArg {
    Idle,
    Bored,
    Petting,
}

impl From<FallbackArg> for EmotionalState {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Idle => EmotionalState::Idle,
            FallbackArg::Bored => EmotionalState::Bored,
            FallbackArg::Petting => EmotionalState::Petting,
        }
    }
}

/// Unix seconds, or an RFC 3339 date such as `2024-05-01T12:00:00Z`.
pub fn parse_timestamp(value: &str) -> Result<i64, String> {
    if let Ok(secs) = value.parse::<i64>() {
        return Ok(secs);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp())
        .map_err(|e| format!("invalid timestamp '{}': {}", value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1700000000"), Ok(1_700_000_000));
        assert_eq!(parse_timestamp("1970-01-02T00:00:00Z"), Ok(86_400));
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_status_command() {
        let args = Args::try_parse_from([
            "minerpet",
            "status",
            "--address",
            "0xabcd",
            "--created-at",
            "0",
            "--last-fed",
            "100",
            "--last-interaction",
            "2024-01-01T00:00:00Z",
            "--tx-pending",
        ])
        .unwrap();

        match args.command {
            Commands::Status {
                last_fed,
                tx_pending,
                now,
                ..
            } => {
                assert_eq!(last_fed, 100);
                assert!(tx_pending);
                assert!(now.is_none());
            }
            _ => panic!("expected status"),
        }
    }

    #[test]
    fn test_parse_interact_action() {
        let args = Args::try_parse_from([
            "minerpet",
            "interact",
            "feed",
            "--address",
            "0x01",
            "--last-fed",
            "0",
            "--last-interaction",
            "0",
        ])
        .unwrap();
        assert!(matches!(
            args.command,
            Commands::Interact {
                action: InteractionArg::Feed,
                ..
            }
        ));
    }

    #[test]
    fn test_mood_arguments_are_checked() {
        let args = Args::try_parse_from(["minerpet", "animate", "--state", "happy"]).unwrap();
        match args.command {
            Commands::Animate { state, .. } => {
                assert_eq!(EmotionalState::from(state), EmotionalState::Happy)
            }
            _ => panic!("expected animate"),
        }

        assert!(Args::try_parse_from(["minerpet", "animate", "--state", "hapy"]).is_err());

        let status = |fallback: &str| {
            Args::try_parse_from([
                "minerpet",
                "status",
                "--address",
                "0x01",
                "--created-at",
                "0",
                "--last-fed",
                "0",
                "--last-interaction",
                "0",
                "--fallback",
                fallback,
            ])
        };
        match status("bored").unwrap().command {
            Commands::Status { fallback, .. } => {
                assert_eq!(EmotionalState::from(fallback), EmotionalState::Bored)
            }
            _ => panic!("expected status"),
        }
        assert!(status("dead").is_err());
    }
}
