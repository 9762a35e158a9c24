use rolodex_driver::config::StoreOpt;
use std::net::SocketAddr;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "rolodex-web", about = "Serve the contacts web app")]
pub struct ServeOpt {
    #[structopt(flatten)]
    pub store: StoreOpt,
    /// Address to listen on
    #[structopt(long, env = "ROLODEX_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: SocketAddr,
}
