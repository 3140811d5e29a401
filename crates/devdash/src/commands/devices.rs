//! Device command handlers. Read-only, served from local device data.

use tabled::Tabled;

use devdash_core::{Device, DeviceSource, DeviceStore};

use crate::cli::{DeviceListArgs, DevicesArgs, DevicesCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl DeviceRow {
    fn new(d: &Device, color: bool) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            ip: d.ip.clone(),
            mac: d.mac.clone(),
            status: output::online_label(d.online, color),
            speed: d.speed.clone(),
            tags: d.tags.join(", "),
            last_seen: d.last_seen.clone(),
        }
    }
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Devices")]
    devices: usize,
}

fn detail(d: &Device, color: bool) -> String {
    let mut lines = vec![
        format!("ID:        {}", d.id),
        format!("Name:      {}", d.name),
        format!("Status:    {}", output::online_label(d.online, color)),
        format!("IP:        {}", d.ip),
        format!("MAC:       {}", d.mac),
        format!("Speed:     {}", d.speed),
        format!("Last seen: {}", d.last_seen),
        format!("Firmware:  {}", d.firmware),
        format!("Uptime:    {}", d.uptime),
        format!("CPU:       {:.0}%", d.cpu_load),
        format!("Memory:    {:.0}%", d.memory_usage),
        format!("Download:  {}", d.download_speed),
        format!("Upload:    {}", d.upload_speed),
        format!(
            "Tags:      {}",
            if d.tags.is_empty() {
                "-".into()
            } else {
                d.tags.join(", ")
            }
        ),
    ];
    for (i, sim) in d.sim_cards.iter().enumerate() {
        let marker = if sim.active { " (active)" } else { "" };
        lines.push(format!(
            "SIM {}:     {} {} {}{marker}",
            i + 1,
            sim.operator,
            sim.connection,
            sim.speed
        ));
    }
    lines.join("\n")
}

/// Load the store for the active profile and apply list filters.
fn load_store(global: &GlobalOpts) -> Result<DeviceStore, CliError> {
    let source = DeviceSource::load(&config::device_source(global)?)?;
    Ok(DeviceStore::from_source(source))
}

fn apply_filters(store: &mut DeviceStore, list: &DeviceListArgs) {
    for tag in &list.tag {
        if !store.selected_tags().contains(tag) {
            store.toggle_tag(tag);
        }
    }
    if let Some(ref query) = list.search {
        store.set_search_query(query.as_str());
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let mut store = load_store(global)?;

    match args.command {
        DevicesCommand::List(list) => {
            apply_filters(&mut store, &list);
            let devices: Vec<Device> = store
                .filtered_devices()
                .into_iter()
                .filter(|d| !list.online || d.online)
                .cloned()
                .collect();
            let out = output::render_list(
                &global.output,
                &devices,
                |d| DeviceRow::new(d, color),
                |d| d.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Get { id } => {
            let device = store.require_device(&id)?;
            let out = output::render_single(
                &global.output,
                device,
                |d| detail(d, color),
                |d| d.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Tags => {
            let tags: Vec<String> = store.all_tags().into_iter().map(str::to_owned).collect();
            let out = output::render_list(
                &global.output,
                &tags,
                |t| TagRow {
                    tag: t.clone(),
                    devices: store.devices().iter().filter(|d| d.has_tag(t)).count(),
                },
                Clone::clone,
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
