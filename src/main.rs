use clap::Parser as _;

fn main() {
    let cli = trysh::Cli::parse();
    let code = match trysh::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: Error: {}", env!("CARGO_PKG_NAME"), err);
            2
        }
    };
    std::process::exit(code);
}
