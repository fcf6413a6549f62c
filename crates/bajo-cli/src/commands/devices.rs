//! Audio input device management command.

use clap::{Args, Subcommand};

use bajo_io::{default_input, list_devices};

/// Arguments for `bajo devices`.
#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Debug, Subcommand)]
enum DevicesCommand {
    /// List all available audio input devices
    List {
        /// Include virtual/loopback device information and setup guidance
        #[arg(long)]
        include_virtual: bool,
    },

    /// Show default input device information
    Info,
}

/// Run the devices command.
pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List {
        include_virtual: false,
    }) {
        DevicesCommand::List { include_virtual } => {
            let devices = list_devices()?;

            if devices.is_empty() {
                println!("No audio input devices found.");
                return Ok(());
            }

            println!("Available Input Devices");
            println!("=======================\n");

            for (idx, device) in devices.iter().enumerate() {
                println!(
                    "  [{}] {} ({} Hz, {} ch)",
                    idx, device.name, device.default_sample_rate, device.default_channels
                );
            }

            println!();
            println!("Total: {} input device(s)", devices.len());
            println!();
            println!("Tip: Use device index or partial name with --device:");
            println!("  bajo realtime --device 0");
            println!("  bajo realtime --device \"monitor\" --output meter --normalize");

            if include_virtual {
                println!();
                print_loopback_guidance(&devices);
            }
        }

        DevicesCommand::Info => {
            println!("Default Input Device");
            println!("====================\n");

            match default_input()? {
                Some(device) => {
                    println!("  Name: {}", device.name);
                    println!("  Sample Rate: {} Hz", device.default_sample_rate);
                    println!("  Channels: {}", device.default_channels);
                }
                None => println!("  None"),
            }
        }
    }

    Ok(())
}

fn print_loopback_guidance(devices: &[bajo_io::AudioDevice]) {
    // Check for common loopback device names
    let loopback_keywords = ["loopback", "blackhole", "virtual", "vb-audio", "cable", "monitor"];

    let virtual_devices: Vec<_> = devices
        .iter()
        .filter(|d| {
            let name_lower = d.name.to_lowercase();
            loopback_keywords.iter().any(|kw| name_lower.contains(kw))
        })
        .collect();

    println!("Virtual/Loopback Devices:");
    println!("-------------------------");

    if virtual_devices.is_empty() {
        println!("  [!] No loopback devices detected");
        println!();
        println!("  Bass extraction from system audio needs a virtual audio driver:");
        println!();

        #[cfg(target_os = "windows")]
        {
            println!("  Windows:");
            println!("    - VB-Audio Virtual Cable: https://vb-audio.com/Cable/");
            println!("    - VoiceMeeter: https://vb-audio.com/Voicemeeter/");
        }

        #[cfg(target_os = "macos")]
        {
            println!("  macOS:");
            println!("    - BlackHole: https://existential.audio/blackhole/");
            println!("    - Loopback: https://rogueamoeba.com/loopback/");
        }

        #[cfg(target_os = "linux")]
        {
            println!("  Linux (PulseAudio/PipeWire):");
            println!("    pactl load-module module-loopback");
            println!("    # Or capture an output's monitor source directly:");
            println!("    bajo realtime --device \"Monitor\"");
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            println!("  Platform-specific guidance not available.");
            println!("  Search for \"virtual audio cable\" for your operating system.");
        }
    } else {
        for device in virtual_devices {
            println!(
                "  - {} ({} Hz, {} ch)",
                device.name, device.default_sample_rate, device.default_channels
            );
        }
    }
}
