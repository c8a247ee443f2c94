use self::{extract_sprites::ExtractSprites, rename_sprites::RenameSprites};

mod extract_sprites;
mod rename_sprites;

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

#[derive(Debug, PartialEq, Eq)]
pub enum CliRes {
    Ok,
    Err,
    NoCli,
}

// Add new modules here.
const MODULES: &[&dyn Cli] = &[&ExtractSprites, &RenameSprites];

/// Runs command-line options
pub fn cli() -> CliRes {
    let args: Vec<String> = std::env::args().collect();

    run(MODULES, &args)
}

/// `args[0]` is the binary, `args[1]` the module name or `help`.
fn run(modules: &[&dyn Cli], args: &[String]) -> CliRes {
    let help = || {
        println!(
            "\
spritecut

Available modules:"
        );
        for module in modules {
            println!("{}", module.name());
        }
        println!("\nhelp <module> prints the options of a module");
    };

    // No arguments
    if args.len() < 2 {
        help();
        return CliRes::NoCli;
    }

    if args[1] == "help" {
        let Some(module) = args
            .get(2)
            .and_then(|name| modules.iter().find(|module| module.name() == name))
        else {
            help();
            return CliRes::NoCli;
        };

        module.cli_help();

        return CliRes::Ok;
    }

    for module in modules {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    help();

    CliRes::NoCli
}
