//! Machine configuration and per-run program options

use clap::{App, Arg, ArgMatches};
use serde::{Deserialize, Serialize};
use serde_json;
use std::{fs, io};

/// Timing parameters of the host loop.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct MachineConfig {
    /// CPU cycles spent on each scanline before LY advances.
    pub cycles_per_scanline: u32,

    /// Scanlines per frame, including the vertical blank.
    pub scanlines_per_frame: u32,

    /// The scanline on which VBlank is requested.
    pub vblank_scanline: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            cycles_per_scanline: 456,
            scanlines_per_frame: 154,
            vblank_scanline: 144,
        }
    }
}

impl MachineConfig {
    pub fn read(filename: &str) -> io::Result<Self> {
        let config_file = fs::File::open(filename)?;
        let config = serde_json::from_reader(config_file)?;

        Ok(config)
    }
}

/// The program image a command runs against, plus where its configuration
/// comes from.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Program {
    image: String,
    config: Option<String>,
}

impl Program {
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .value_name("image.gb")
                .index(1)
                .required(true)
                .help("The program image to load at address 0"),
        )
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("config.json")
                .takes_value(true)
                .help("Machine timing configuration"),
        )
    }

    /// Construct a Program from clap ArgMatches
    pub fn from_arg_matches(args: &ArgMatches) -> Program {
        Program {
            image: args.value_of("image").unwrap_or_default().to_string(),
            config: args.value_of("config").map(|s| s.to_string()),
        }
    }

    pub fn as_image(&self) -> &str {
        &self.image
    }

    pub fn as_config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Read the program image off disk.
    pub fn read_image(&self) -> io::Result<Vec<u8>> {
        if self.image.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Did not specify an image",
            ));
        }

        fs::read(&self.image)
    }

    /// The machine configuration for this program: the config file if one was
    /// given, otherwise the defaults.
    pub fn machine_config(&self) -> io::Result<MachineConfig> {
        match &self.config {
            Some(filename) => MachineConfig::read(filename),
            None => Ok(MachineConfig::default()),
        }
    }
}
