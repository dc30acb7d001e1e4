use super::*;

// Common Utils
// ------------------------------------------------------------------------------------------------
pub const PAN_ONLY_DEVICE: AudioDeviceID = 41;
pub const BALANCE_ONLY_DEVICE: AudioDeviceID = 42;
pub const NO_BALANCE_DEVICE: AudioDeviceID = 43;
pub const DUAL_BALANCE_DEVICE: AudioDeviceID = 44;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn add_stereo_device(system: &MockAudioSystem, id: AudioDeviceID, name: &str) {
    system.add_device(id, name, &[2]);
}

// One device for each combination of balance controls.
pub fn test_balance_system() -> MockAudioSystem {
    init_logging();
    let system = MockAudioSystem::new();

    add_stereo_device(&system, PAN_ONLY_DEVICE, "Pan Only");
    system.set(PAN_ONLY_DEVICE, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS, 0.5f32);

    add_stereo_device(&system, BALANCE_ONLY_DEVICE, "Balance Only");
    system.set(BALANCE_ONLY_DEVICE, &OUTPUT_VIRTUAL_MAIN_BALANCE_PROPERTY_ADDRESS, 0.5f32);

    add_stereo_device(&system, NO_BALANCE_DEVICE, "No Balance");

    add_stereo_device(&system, DUAL_BALANCE_DEVICE, "Both");
    system.set(DUAL_BALANCE_DEVICE, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS, 0.5f32);
    system.set(DUAL_BALANCE_DEVICE, &OUTPUT_VIRTUAL_MAIN_BALANCE_PROPERTY_ADDRESS, 0.5f32);

    system
}

// A fully populated device, as a typical built-in output would report it.
pub fn add_described_device(system: &MockAudioSystem, id: AudioDeviceID) {
    add_stereo_device(system, id, "MacBook Pro Speakers");
    system.set_string(id, &MANUFACTURER_PROPERTY_ADDRESS, "Apple Inc.");
    system.set(
        id,
        &OUTPUT_PREFERRED_STEREO_CHANNELS_PROPERTY_ADDRESS,
        StereoChannels { left: 1, right: 2 },
    );
    system.set_array(
        id,
        &OUTPUT_AVAILABLE_SAMPLE_RATES_PROPERTY_ADDRESS,
        &[
            ValueRange {
                minimum: 44_100.0,
                maximum: 44_100.0,
            },
            ValueRange {
                minimum: 48_000.0,
                maximum: 48_000.0,
            },
        ],
    );
    system.set(id, &output_volume_property_address(LEFT_CHANNEL), 0.75f32);
    system.set(id, &output_volume_property_address(RIGHT_CHANNEL), 0.5f32);
    system.set(id, &OUTPUT_STEREO_PAN_PROPERTY_ADDRESS, 0.25f32);
    system.set(id, &OUTPUT_MUTE_PROPERTY_ADDRESS, 1u32);
    system.set(id, &TRANSPORT_TYPE_PROPERTY_ADDRESS, TRANSPORT_TYPE_BUILT_IN);
}

#[test]
fn test_balance_system_layout() {
    let system = test_balance_system();
    let devices: Vec<AudioObjectID> = system
        .read_array(SYSTEM_OBJECT, &DEVICES_PROPERTY_ADDRESS)
        .unwrap();
    assert_eq!(
        devices,
        vec![
            PAN_ONLY_DEVICE,
            BALANCE_ONLY_DEVICE,
            NO_BALANCE_DEVICE,
            DUAL_BALANCE_DEVICE
        ]
    );
}
