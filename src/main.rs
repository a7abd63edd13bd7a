use std::io;

fn main() -> io::Result<()> {
    env_logger::init();

    gbinterp::cli::main()
}
