mod common;
mod projection;
mod routing;
