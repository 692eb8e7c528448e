#![allow(dead_code)]
//! Test harness utilities for stagelink-net integration tests.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

use glam::{Quat, Vec3};

use stagelink_net::framing::write_frame;
use stagelink_net::{DistributionConfig, Session};
use stagelink_types::{NodeKind, NodeRef, NodeTable, SceneGraph, SceneObject, SnapshotSet};

/// A scene object that records every write the dispatcher makes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockObject {
    pub position: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
    pub color: Option<[f32; 3]>,
    pub intensity: Option<f32>,
    pub spot_angle: Option<f32>,
}

impl SceneObject for MockObject {
    fn set_position(&mut self, position: Vec3) {
        self.position = Some(position);
    }
    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = Some(rotation);
    }
    fn set_scale(&mut self, scale: Vec3) {
        self.scale = Some(scale);
    }
    fn set_color(&mut self, rgb: [f32; 3]) {
        self.color = Some(rgb);
    }
    fn set_intensity(&mut self, intensity: f32) {
        self.intensity = Some(intensity);
    }
    fn set_spot_angle(&mut self, radians: f32) {
        self.spot_angle = Some(radians);
    }
}

/// Name-keyed mock scene graph.
#[derive(Debug, Default)]
pub struct MockScene {
    pub objects: HashMap<String, MockObject>,
}

impl MockScene {
    /// A scene containing the objects of [`make_nodes`].
    pub fn with_session_objects() -> Self {
        let mut scene = Self::default();
        for name in ["root", "cube", "key_light", "camera_main"] {
            scene.objects.insert(name.into(), MockObject::default());
        }
        scene
    }

    pub fn object(&self, name: &str) -> &MockObject {
        self.objects.get(name).expect("object in mock scene")
    }
}

impl SceneGraph for MockScene {
    fn object_mut(&mut self, name: &str) -> Option<&mut dyn SceneObject> {
        self.objects
            .get_mut(name)
            .map(|o| o as &mut dyn SceneObject)
    }
}

/// Snapshot buffers with recognizable contents and five objects.
pub fn make_snapshots() -> SnapshotSet {
    SnapshotSet {
        header: b"header-blob".to_vec(),
        nodes: b"nodes-blob".to_vec(),
        geometry: b"geometry-blob".to_vec(),
        textures: b"textures-blob".to_vec(),
        object_count: 5,
    }
}

/// Node table matching [`MockScene::with_session_objects`]: index 2 is a
/// light, index 3 a camera.
pub fn make_nodes() -> NodeTable {
    NodeTable::new(vec![
        NodeRef::new("root", NodeKind::Group),
        NodeRef::new("cube", NodeKind::Geo),
        NodeRef::new("key_light", NodeKind::Light),
        NodeRef::new("camera_main", NodeKind::Camera),
    ])
}

/// Build a raw update message: kind byte, type index, LE node index, then
/// LE f32 payload fields.
pub fn update_message(param_index: u8, node_index: u32, fields: &[f32]) -> Vec<u8> {
    let mut buf = vec![0u8, param_index];
    buf.extend_from_slice(&node_index.to_le_bytes());
    for f in fields {
        buf.extend_from_slice(&f.to_le_bytes());
    }
    buf
}

/// A started session plus the publisher side of its subscriber channel.
pub struct Harness {
    pub session: Session,
    pub publisher: TcpStream,
    pub publisher_listener: TcpListener,
    pub scene: MockScene,
}

impl Harness {
    /// Bind a publisher socket, start a session against it on ephemeral
    /// ports, and accept the subscriber connection.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind publisher");
        let sync_port = listener.local_addr().expect("publisher addr").port();

        let config = DistributionConfig {
            server_ip: "127.0.0.1".into(),
            dist_port: 0,
            sync_port,
        };
        let mut session = Session::new(config);
        session
            .start(make_snapshots(), make_nodes())
            .expect("session start");

        let (publisher, _) = listener.accept().expect("accept subscriber");

        Self {
            session,
            publisher,
            publisher_listener: listener,
            scene: MockScene::with_session_objects(),
        }
    }

    pub fn responder_addr(&self) -> SocketAddr {
        self.session.responder_addr().expect("responder bound")
    }

    /// Publish one framed update message.
    pub fn publish(&mut self, msg: &[u8]) {
        write_frame(&mut self.publisher, msg).expect("publish update");
    }
}

/// Tick the session until `done` passes or the timeout elapses.
pub fn drive_until<F>(
    session: &mut Session,
    scene: &mut MockScene,
    timeout: Duration,
    mut done: F,
) -> bool
where
    F: FnMut(&MockScene) -> bool,
{
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        session.tick(scene, Instant::now());
        if done(scene) {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

/// Tick the session for a fixed duration.
pub fn drive_for(session: &mut Session, scene: &mut MockScene, duration: Duration) {
    drive_until(session, scene, duration, |_| false);
}

/// Raw request/reply client for responder tests.
///
/// Tests are single-threaded, so requests are sent first and the session
/// is driven before the blocking `recv_reply`.
pub struct RawConsumer {
    stream: TcpStream,
}

impl RawConsumer {
    pub fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).expect("connect consumer");
        stream
            .set_read_timeout(Some(Duration::from_secs(5)))
            .expect("read timeout");
        Self { stream }
    }

    pub fn request(&mut self, keyword: &str) {
        write_frame(&mut self.stream, keyword.as_bytes()).expect("send request");
    }

    pub fn recv_reply(&mut self) -> Vec<u8> {
        let mut len_buf = [0u8; 4];
        self.stream.read_exact(&mut len_buf).expect("reply length");
        let len = u32::from_be_bytes(len_buf) as usize;
        let mut payload = vec![0u8; len];
        self.stream.read_exact(&mut payload).expect("reply payload");
        payload
    }
}

/// Flush helper for tests publishing partial frames by hand.
pub fn send_raw(stream: &mut TcpStream, bytes: &[u8]) {
    stream.write_all(bytes).expect("send raw bytes");
    stream.flush().expect("flush raw bytes");
}
