//! End-to-end loop over loopback TCP: the server adapter feeds real
//! sockets into [`AppService`], one connection per poll.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use crate::mock_ports::{MockClock, MockSystem, RecordingSink};

use apmonitor::adapters::http_server::HttpServer;
use apmonitor::app::service::AppService;
use apmonitor::config::SystemConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn request(addr: SocketAddr, raw: String) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut s = TcpStream::connect(addr).unwrap();
        s.write_all(raw.as_bytes()).unwrap();
        let mut out = String::new();
        s.read_to_string(&mut out).unwrap();
        out
    })
}

struct Rig {
    server: HttpServer,
    addr: SocketAddr,
    app: AppService,
    clock: MockClock,
    system: MockSystem,
    sink: RecordingSink,
    rng: StdRng,
}

impl Rig {
    fn new() -> Self {
        let config = SystemConfig::default();
        let server = HttpServer::bind(0, config.http_read_timeout_ms).unwrap();
        let addr = SocketAddr::from(([127, 0, 0, 1], server.local_addr().unwrap().port()));
        let mut app = AppService::new(&config);
        let mut sink = RecordingSink::new();
        app.start(0, &mut sink);
        Self {
            server,
            addr,
            app,
            clock: MockClock::default(),
            system: MockSystem::default(),
            sink,
            rng: StdRng::seed_from_u64(3),
        }
    }

    /// One main-loop iteration.
    fn iterate(&mut self) -> bool {
        let Self {
            server,
            app,
            clock,
            system,
            sink,
            rng,
            ..
        } = self;
        let served = server
            .poll(|req| app.handle_request(req, &*clock, &*system, &mut *sink))
            .unwrap();
        app.tick(&*clock, rng, sink);
        served
    }

    /// Iterate until one client has been served.
    fn serve_one(&mut self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !self.iterate() {
            assert!(Instant::now() < deadline, "no client arrived");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn exchange(&mut self, raw: &str) -> String {
        let client = request(self.addr, raw.to_string());
        self.serve_one();
        client.join().unwrap()
    }
}

#[test]
fn idle_iteration_serves_nothing() {
    let mut rig = Rig::new();
    assert!(!rig.iterate());
}

#[test]
fn post_then_get_over_tcp() {
    let mut rig = Rig::new();

    let body = "value=%23ff0000";
    let reply = rig.exchange(&format!(
        "POST /api/color HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\
         Content-Length: {}\r\n\r\n{body}",
        body.len()
    ));
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(reply.contains("Content-Type: application/json\r\n"));
    assert!(reply.ends_with(r##"{"color":"#ff0000"}"##));

    let reply = rig.exchange("GET /api/color HTTP/1.1\r\n\r\n");
    assert!(reply.ends_with(r##"{"color":"#ff0000"}"##));
}

#[test]
fn page_and_404_over_tcp() {
    let mut rig = Rig::new();

    let reply = rig.exchange("GET / HTTP/1.1\r\nHost: 192.168.4.1\r\n\r\n");
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(reply.contains("Content-Type: text/html; charset=utf-8\r\n"));
    assert!(reply.ends_with("</html>"));

    let reply = rig.exchange("GET /nope?a=b HTTP/1.1\r\n\r\n");
    assert!(reply.starts_with("HTTP/1.1 404 Not Found\r\n"));
    assert!(reply.contains("URI: /nope\nMethod: GET\nArguments: 1\n a: b\n"));
}

#[test]
fn oversized_request_gets_413() {
    let mut rig = Rig::new();
    let reply = rig.exchange("POST /api/color HTTP/1.1\r\nContent-Length: 10000\r\n\r\n");
    assert!(reply.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
}

#[test]
fn max_u64_content_length_gets_413_and_server_keeps_serving() {
    let mut rig = Rig::new();
    let reply = rig.exchange(
        "POST /api/color HTTP/1.1\r\nContent-Length: 18446744073709551615\r\n\r\n",
    );
    assert!(reply.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));

    let reply = rig.exchange("GET /api/color HTTP/1.1\r\n\r\n");
    assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
}

#[test]
fn sensor_ticks_between_requests() {
    let mut rig = Rig::new();
    rig.sink.clear();
    rig.clock.set(5_001);
    rig.iterate();
    assert_eq!(rig.sink.sensor_updates().len(), 1);
}
