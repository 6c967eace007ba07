use colored::Color;
use common::logger::Logger;
use happyhour::commands::UserCommand;
use happyhour::config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let logger = Logger::new("happyhour", Color::BrightMagenta);

    let config = Config::load();
    if config.offline {
        logger.info("Running with the offline places provider");
    }
    let ui = happyhour::launch(&config);

    let input = async {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<UserCommand>() {
                Ok(UserCommand::Quit) => {
                    ui.do_send(UserCommand::Quit);
                    break;
                }
                Ok(command) => ui.do_send(command),
                Err(err) => {
                    logger.warn(err.to_string());
                    ui.do_send(UserCommand::Help);
                }
            }
        }
        Ok::<(), std::io::Error>(())
    };

    tokio::select! {
        _ = ctrl_c() => {
            logger.info("Ctrl-C received, shutting down...");
        }
        res = input => {
            if let Err(err) = res {
                logger.error(format!("Failed to read input: {}", err));
            }
        }
    }
    actix::System::current().stop();
    Ok(())
}
