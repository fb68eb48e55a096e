pub mod server;

/// Action to be executed by the binary after CLI parsing.
#[derive(Debug)]
pub enum Action {
    Server(server::Args),
}
