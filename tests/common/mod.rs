//! Shared utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A small haproxy configuration with repeated sections and keys.
pub const HAPROXY_SAMPLE: &str = "\
global
\tmaxconn 50000
\tdaemon
\tstats socket /var/run/haproxy.stat mode 777
defaults
\tstats enable
\toption httpchk HEAD /haproxy?monitor HTTP/1.0
\ttimeout check 5s
listen s 0.0.0.0:80
\tmonitor-uri /haproxy?monitor
\tmonitor fail if
\tserver 10.0.0.x:80 10.0.0.x:80 maxconn 25 check inter 5s rise 3 fall 2
\tacl servers_down nbsrv(servers) lt 1
listen s 0.0.0.0:443
\tmode tcp
\toption ssl-hello-chk
\tserver server1 10.0.0.x:443 maxconn 25 check inter 5s rise 18 fall 3
\tserver server2 10.0.0.x:443 maxconn 25 check inter 4s rise 8 fall 2
";

/// Sections recognized in `HAPROXY_SAMPLE`.
pub const SAMPLE_SECTIONS: [&str; 3] = ["global", "defaults", "listen"];

/// Write `text` to `name` inside `dir` and return the full path.
pub fn write_config(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}
