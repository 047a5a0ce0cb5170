//! Relay tap walkthrough
//!
//! Run with: cargo run --example relay_tap
//!
//! Simulates one relayed connection end to end without any sockets: a frame
//! chain hands every frame to the installed tap and then "forwards" it, the
//! way a real relay would. The pushed traffic covers the full tracking
//! surface — inbound position and look reports, a world identity
//! announcement from the endpoint-side agent, and an outbound respawn —
//! then prints the live record after each step.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use uuid::Uuid;

use locapi::error::InstallError;
use locapi::intercept::{FrameChain, FrameTap};
use locapi::protocol::constants::*;
use locapi::protocol::frames::{DimensionChange, Look, Position, PositionAndLook};
use locapi::protocol::{Direction, Frame};
use locapi::{SessionKey, Tracker, WorldIdentity};

/// In-process stand-in for a connection's frame-processing chain
#[derive(Default)]
struct LoopChain {
    tap: Mutex<Option<Arc<dyn FrameTap>>>,
    forwarded: Mutex<Vec<(Direction, i32)>>,
}

impl LoopChain {
    /// Observe, then forward — the contract every chain must keep
    fn push(&self, direction: Direction, frame: Frame) {
        if let Some(tap) = self.tap.lock().unwrap().as_ref() {
            tap.observe(direction, &frame);
        }
        self.forwarded.lock().unwrap().push((direction, frame.id));
    }
}

impl FrameChain for LoopChain {
    fn install(&self, tap: Arc<dyn FrameTap>) -> Result<(), InstallError> {
        *self.tap.lock().unwrap() = Some(tap);
        Ok(())
    }

    fn uninstall(&self) {
        self.tap.lock().unwrap().take();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locapi=debug".parse()?),
        )
        .init();

    let tracker = Tracker::new();
    let chain = Arc::new(LoopChain::default());
    let key = SessionKey(1);

    let _tap = tracker.attach(key, chain.clone()).await;
    println!("session {} attached", key);

    // Client reports where it is.
    chain.push(
        Direction::Inbound,
        Frame::new(
            SERVERBOUND_POSITION,
            Position {
                x: 10.5,
                y: 64.0,
                z: -5.25,
                on_ground: true,
            }
            .encode(),
        ),
    );
    chain.push(
        Direction::Inbound,
        Frame::new(
            SERVERBOUND_LOOK,
            Look {
                yaw: 90.0,
                pitch: -15.0,
                on_ground: true,
            }
            .encode(),
        ),
    );
    println!("after movement:  {}", tracker.lookup(key).unwrap().snapshot());

    // The endpoint-side agent announces the actual world.
    let world = WorldIdentity::new(Uuid::from_u64_pair(0xDEAD, 0xBEEF), "hub");
    chain.push(
        Direction::Inbound,
        Frame::new(SERVERBOUND_TAGGED, world.to_tagged().encode()),
    );

    // An unrelated tagged payload rides the same channel; it is ignored.
    chain.push(
        Direction::Inbound,
        Frame::new(
            SERVERBOUND_TAGGED,
            locapi::protocol::TaggedMessage::new("MOD|Chat", Bytes::from_static(b"hi")).encode(),
        ),
    );
    println!("after bridge:    {}", tracker.lookup(key).unwrap().snapshot());

    // Server respawns the player into the nether and teleports them.
    chain.push(
        Direction::Outbound,
        Frame::new(
            CLIENTBOUND_RESPAWN,
            DimensionChange { dimension_id: -1 }.encode(),
        ),
    );
    chain.push(
        Direction::Outbound,
        Frame::new(
            CLIENTBOUND_POSITION_AND_LOOK,
            PositionAndLook {
                x: 0.5,
                y: 70.0,
                z: 0.5,
                yaw: 0.0,
                pitch: 0.0,
                flags: 0,
            }
            .encode(),
        ),
    );
    println!("after teleport:  {}", tracker.lookup(key).unwrap().snapshot());

    let forwarded = chain.forwarded.lock().unwrap().len();
    println!("frames forwarded untouched: {}", forwarded);

    tracker.detach(key).await;
    println!(
        "after disconnect, tracked: {}",
        tracker.lookup(key).is_some()
    );

    Ok(())
}
