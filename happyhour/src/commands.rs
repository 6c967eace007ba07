use actix::Message;
use common::types::coordinates::LatLng;
use std::str::FromStr;
use thiserror::Error;

pub const USAGE: &str = "\
commands:
  pan <lat> <lng>     move the map center
  zoom <level>        change the zoom level
  search              search this area (after moving the map)
  venues              list the venues on the map
  select <id|#n>      open the info panel of a venue
  close               close the info panel
  deals [query]       filter the deal list
  status              show the map status
  help                show this message
  quit                exit";

/// Which venue a `select` command refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum VenueRef {
    Id(String),
    /// 1-based position in the last rendered venue list.
    Position(usize),
}

#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub enum UserCommand {
    Pan(LatLng),
    Zoom(u8),
    Search,
    Venues,
    Select(VenueRef),
    Close,
    Deals(String),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for UserCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "pan" => match args.as_slice() {
                [lat, lng] => {
                    let lat = lat.parse().map_err(|_| CommandError::Usage("pan <lat> <lng>"))?;
                    let lng = lng.parse().map_err(|_| CommandError::Usage("pan <lat> <lng>"))?;
                    Ok(UserCommand::Pan(LatLng::new(lat, lng)))
                }
                _ => Err(CommandError::Usage("pan <lat> <lng>")),
            },
            "zoom" => match args.as_slice() {
                [level] => level
                    .parse()
                    .map(UserCommand::Zoom)
                    .map_err(|_| CommandError::Usage("zoom <level>")),
                _ => Err(CommandError::Usage("zoom <level>")),
            },
            "search" => Ok(UserCommand::Search),
            "venues" => Ok(UserCommand::Venues),
            "select" => match args.as_slice() {
                [target] => match target.strip_prefix('#') {
                    Some(position) => position
                        .parse()
                        .ok()
                        .filter(|position| *position > 0)
                        .map(|position| UserCommand::Select(VenueRef::Position(position)))
                        .ok_or(CommandError::Usage("select <id|#n>")),
                    None => Ok(UserCommand::Select(VenueRef::Id(target.to_string()))),
                },
                _ => Err(CommandError::Usage("select <id|#n>")),
            },
            "close" => Ok(UserCommand::Close),
            "deals" => Ok(UserCommand::Deals(rest.to_string())),
            "status" => Ok(UserCommand::Status),
            "help" | "?" => Ok(UserCommand::Help),
            "quit" | "exit" => Ok(UserCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
