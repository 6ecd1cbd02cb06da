mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("database-server", server::run_database)
}
