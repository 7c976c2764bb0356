use anyhow::{Context, bail};
use reel_core::{ReelConfig, Size};
use reel_machine::{EventKind, Mailbox, SlotMachineController};
use reel_ui::{Axis, HeadlessSurface, ScrollSurface};
use web_time::Instant;

const FRAME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 60 * 60;

fn load_config() -> anyhow::Result<ReelConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            ReelConfig::from_json(&json).with_context(|| format!("parsing config {path}"))
        }
        None => Ok(ReelConfig::slot_machine()),
    }
}

fn run_until(
    machine: &mut SlotMachineController<HeadlessSurface>,
    what: &str,
    done: impl Fn(&SlotMachineController<HeadlessSurface>) -> bool,
) -> anyhow::Result<usize> {
    let mut frames = 0;
    while !done(machine) {
        if frames == MAX_FRAMES {
            bail!("gave up waiting for {what} after {frames} frames");
        }
        machine.tick(FRAME);
        frames += 1;
    }
    Ok(frames)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    let surface = HeadlessSurface::strip(
        Axis::Vertical,
        8,
        Size::new(160.0, 120.0),
        Size::new(160.0, 360.0),
    );
    let mailbox = Mailbox::new();
    let mut machine = SlotMachineController::new(Some(surface), config, mailbox.clone());
    let started = Instant::now();

    mailbox.publish(EventKind::StartButtonClick, "demo");
    let frames = run_until(&mut machine, "warm-up", |m| m.can_be_stopped())?;
    log::info!("warm-up done after {frames} frames");

    for _ in 0..60 {
        machine.tick(FRAME);
    }

    mailbox.publish(EventKind::StopButtonClick, "demo");
    machine.tick(FRAME);
    let frames = run_until(&mut machine, "stop", |m| {
        m.readiness().start_interactable.get()
    })?;
    log::info!("stopped after {frames} frames");

    let Some(reel) = machine.reel() else {
        bail!("reel is inert");
    };
    let surface = reel.surface();
    match reel.selected_item() {
        Some(item) => println!(
            "landed on item {} (center {:?}), order {:?}",
            item.0,
            surface.item_local_center(item),
            surface.visual_order()
        ),
        None => println!("no item selected"),
    }
    log::info!("simulated in {:?}", started.elapsed());
    Ok(())
}
