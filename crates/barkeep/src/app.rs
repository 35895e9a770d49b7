use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("barkeep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List and rearrange macOS menu bar items")
        .long_about("barkeep reads the window server's window list to find the status items in the menu bar, and moves an item next to another one by replaying the Command-drag a user would perform.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List displays or menu bar items")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("displays")
                        .about("List active displays")
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("items")
                        .about("List menu bar items from left to right")
                        .arg(display_arg())
                        .arg(
                            Arg::new("on-screen")
                                .long("on-screen")
                                .help("Only include items currently drawn on screen (overrides config)")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(json_arg()),
                ),
        )
        .subcommand(
            Command::new("move")
                .about("Move a menu bar item next to another item")
                .arg(
                    Arg::new("item")
                        .help("Item to move, as '<namespace>/<title>' (see 'barkeep list items')")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("left-of")
                        .long("left-of")
                        .value_name("ITEM")
                        .help("Place the item immediately left of ITEM"),
                )
                .arg(
                    Arg::new("right-of")
                        .long("right-of")
                        .value_name("ITEM")
                        .help("Place the item immediately right of ITEM"),
                )
                .group(
                    ArgGroup::new("destination")
                        .args(["left-of", "right-of"])
                        .required(true)
                        .multiple(false),
                )
                .arg(display_arg()),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn display_arg() -> Arg {
    Arg::new("display")
        .long("display")
        .short('d')
        .value_name("ID")
        .help("Display id (default: the main display)")
        .value_parser(clap::value_parser!(u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "barkeep");
    }

    #[test]
    fn test_cli_list_items_flags() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "barkeep",
                "list",
                "items",
                "--display",
                "2",
                "--on-screen",
                "--json",
            ])
            .unwrap();

        let list = matches.subcommand_matches("list").unwrap();
        let items = list.subcommand_matches("items").unwrap();
        assert_eq!(items.get_one::<u32>("display"), Some(&2));
        assert!(items.get_flag("on-screen"));
        assert!(items.get_flag("json"));
    }

    #[test]
    fn test_cli_list_requires_target() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["barkeep", "list"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_move_right_of() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec![
                "barkeep",
                "move",
                "com.example.a/Item",
                "--right-of",
                "com.example.b/Item",
            ])
            .unwrap();

        let sub = matches.subcommand_matches("move").unwrap();
        assert_eq!(sub.get_one::<String>("item").unwrap(), "com.example.a/Item");
        assert_eq!(
            sub.get_one::<String>("right-of").unwrap(),
            "com.example.b/Item"
        );
        assert!(sub.get_one::<String>("left-of").is_none());
    }

    #[test]
    fn test_cli_move_requires_destination() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec!["barkeep", "move", "com.example.a/Item"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_move_rejects_both_destinations() {
        let app = build_cli();
        let matches = app.try_get_matches_from(vec![
            "barkeep",
            "move",
            "com.example.a/Item",
            "--left-of",
            "com.example.b/Item",
            "--right-of",
            "com.example.c/Item",
        ]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_rejects_non_numeric_display() {
        let app = build_cli();
        let matches =
            app.try_get_matches_from(vec!["barkeep", "list", "items", "--display", "main"]);
        assert!(matches.is_err());
    }

    #[test]
    fn test_cli_verbose_is_global() {
        let app = build_cli();
        let matches = app
            .try_get_matches_from(vec!["barkeep", "list", "displays", "-v"])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
