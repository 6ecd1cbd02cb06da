mod launcher;

fn main() -> std::process::ExitCode {
    launcher::launch("memory-server", server::run_memory)
}
