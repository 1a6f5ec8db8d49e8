mod http_server;

pub(crate) use http_server::run_http_server;
