mod dir_source;
mod http_source;
mod load_cycle;
