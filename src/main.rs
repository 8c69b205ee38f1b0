mod cli;
mod status;

use anyhow::Result;
use clap::Parser;

use cli::{Args, BreedRequest, Commands, EarningsRequest, StatusRequest};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let args = Args::parse();
    let data_dir = args.data_dir;

    match args.command {
        Commands::Traits { address, json } => cli::handle_traits(address, json),
        Commands::Status {
            address,
            created_at,
            last_fed,
            last_interaction,
            now,
            tx_pending,
            last_success,
            session_started,
            last_bred,
            fallback,
            json,
        } => cli::handle_status(
            StatusRequest {
                address,
                created_at,
                last_fed,
                last_interaction,
                now,
                tx_pending,
                last_success,
                session_started,
                last_bred,
                fallback: fallback.into(),
                json,
            },
            data_dir,
        ),
        Commands::Interact {
            action,
            address,
            last_fed,
            last_interaction,
            now,
        } => cli::handle_interact(
            action.into(),
            address,
            last_fed,
            last_interaction,
            now,
            data_dir,
        ),
        Commands::Breed {
            parent_a,
            parent_b,
            gen_a,
            gen_b,
            count,
            seed,
            json,
        } => cli::handle_breed(
            BreedRequest {
                parent_a,
                parent_b,
                gen_a,
                gen_b,
                count,
                seed,
                json,
            },
            data_dir,
        ),
        Commands::Earnings {
            initial,
            current,
            rate,
            elapsed,
            age_days,
            base_units,
            json,
        } => cli::handle_earnings(
            EarningsRequest {
                initial,
                current,
                rate,
                elapsed,
                age_days,
                base_units,
                json,
            },
            data_dir,
        ),
        Commands::Animate {
            state,
            gesture,
            frames,
            fps,
        } => cli::handle_animate(state.into(), gesture.map(Into::into), frames, fps).await,
        Commands::Config { init } => cli::handle_config(init, data_dir),
    }
}
