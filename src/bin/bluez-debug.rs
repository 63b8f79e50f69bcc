//! Inspect BlueZ objects from the command line.
use std::{error::Error, time::Duration};

use bluez_helpers::{
    config::{Config, ConfigPaths},
    services::bluez::{
        AdapterExt, Bluez, BluezObject, BluezObjectExt, Device1Proxy, DeviceExt,
        GattCharacteristic1Proxy, GattCharacteristicExt, GattServiceExt,
    },
    tracing_config,
};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "bluez-debug")]
#[command(about = "Inspect BlueZ adapters, devices and GATT objects")]
struct Cli {
    /// Also write logs to the rolling log file
    #[arg(long)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List Bluetooth controllers
    Adapters,
    /// List devices known to an adapter
    Devices {
        #[arg(short, long, default_value = "hci0")]
        adapter: String,
    },
    /// List GATT services and characteristics of a device
    Services {
        /// Device object path, e.g. /org/bluez/hci0/dev_AA_BB_CC_DD_EE_FF
        device: String,
    },
    /// Find a characteristic by service and characteristic UUID
    Find {
        device: String,
        service_uuid: String,
        characteristic_uuid: String,
    },
    /// Read a characteristic value
    Read {
        /// Characteristic object path
        characteristic: String,
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },
    /// Wait until a device reports Connected = true
    WaitConnected {
        device: String,
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },
    /// Print devices as they are added to and removed from an adapter
    Watch {
        #[arg(short, long, default_value = "hci0")]
        adapter: String,
    },
    /// Print the configuration file schema
    Schema,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let _guard = if cli.log_file {
        Some(tracing_config::init_with_file(config.general.log_level)?)
    } else {
        tracing_config::init(config.general.log_level)?;
        None
    };

    if let Ok(path) = ConfigPaths::main_config() {
        info!("Using configuration from {}", path.display());
    }

    if let Commands::Schema = cli.command {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let bluez = Bluez::system().await?.with_config(config.bluez);

    match cli.command {
        Commands::Adapters => list_adapters(&bluez).await?,
        Commands::Devices { adapter } => list_devices(&bluez, &adapter).await?,
        Commands::Services { device } => list_services(&bluez, &device).await?,
        Commands::Find {
            device,
            service_uuid,
            characteristic_uuid,
        } => find_characteristic(&bluez, &device, &service_uuid, &characteristic_uuid).await?,
        Commands::Read {
            characteristic,
            timeout_ms,
        } => {
            let timeout = timeout_ms.map_or_else(|| bluez.read_timeout(), Duration::from_millis);
            read_characteristic(&bluez, &characteristic, timeout).await?
        }
        Commands::WaitConnected { device, timeout_ms } => {
            let timeout =
                timeout_ms.map_or_else(|| bluez.property_timeout(), Duration::from_millis);
            wait_connected(&bluez, &device, timeout).await?
        }
        Commands::Watch { adapter } => watch_devices(&bluez, &adapter).await?,
        Commands::Schema => {}
    }

    Ok(())
}

async fn list_adapters(bluez: &Bluez) -> Result<(), Box<dyn Error>> {
    for adapter in bluez.adapters().await? {
        let address = adapter.address().await.unwrap_or_default();
        let powered = adapter.powered().await.unwrap_or(false);
        println!("{}  {address}  powered={powered}", adapter.object_path());
    }
    Ok(())
}

async fn list_devices(bluez: &Bluez, name: &str) -> Result<(), Box<dyn Error>> {
    let Some(adapter) = bluez.adapter(name).await? else {
        return Err(format!("adapter {name} not found").into());
    };

    for device in adapter.devices().await? {
        let alias = device.alias().await.unwrap_or_default();
        let connected = device.connected().await.unwrap_or(false);
        println!("{}  {alias}  connected={connected}", device.object_path());
    }
    Ok(())
}

async fn list_services(bluez: &Bluez, path: &str) -> Result<(), Box<dyn Error>> {
    let device: Device1Proxy<'static> = bluez.object(path).await?;

    for service in device.services().await? {
        println!("{}  {}", service.object_path(), service.uuid().await?);
        for characteristic in service.characteristics().await? {
            let flags = characteristic.flags().await.unwrap_or_default();
            println!(
                "  {}  {}  [{}]",
                characteristic.object_path(),
                characteristic.uuid().await?,
                flags.join(",")
            );
        }
    }
    Ok(())
}

async fn find_characteristic(
    bluez: &Bluez,
    path: &str,
    service_uuid: &str,
    characteristic_uuid: &str,
) -> Result<(), Box<dyn Error>> {
    let device: Device1Proxy<'static> = bluez.object(path).await?;

    let Some(service) = device.service(service_uuid).await? else {
        println!("service {service_uuid} not found");
        return Ok(());
    };

    match service.characteristic(characteristic_uuid).await? {
        Some(characteristic) => println!("{}", characteristic.object_path()),
        None => println!("characteristic {characteristic_uuid} not found"),
    }
    Ok(())
}

async fn read_characteristic(
    bluez: &Bluez,
    path: &str,
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    let characteristic: GattCharacteristic1Proxy<'static> = bluez.object(path).await?;

    let value = characteristic.read_value_with_timeout(timeout).await?;
    let hex: Vec<String> = value.iter().map(|byte| format!("{byte:02x}")).collect();
    println!("{}", hex.join(" "));
    Ok(())
}

async fn wait_connected(
    bluez: &Bluez,
    path: &str,
    timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    let device: Device1Proxy<'static> = bluez.object(path).await?;
    let strategy = bluez.wait_strategy();

    device
        .wait_for_property_value_with(&strategy, "Connected", || device.connected(), true, timeout)
        .await?;

    println!("{path} connected");
    Ok(())
}

async fn watch_devices(bluez: &Bluez, name: &str) -> Result<(), Box<dyn Error>> {
    let Some(adapter) = bluez.adapter(name).await? else {
        return Err(format!("adapter {name} not found").into());
    };

    let added = adapter
        .watch_devices_added(|device| println!("+ {}", device.object_path()))
        .await?;
    let removed = adapter
        .watch_devices_removed(|device| println!("- {}", device.object_path()))
        .await?;

    info!("Watching {name}, press Ctrl-C to stop");
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        result = added.closed() => warn!("Added subscription ended: {result:?}"),
    }

    removed.dispose();
    Ok(())
}
