use serde::{Deserialize, Serialize};

use super::layout;

/// Byte-coded enumeration stored in a single record byte.
pub trait WireEnum: Copy {
    /// Human-readable name of the enumeration, used in diagnostics.
    const KIND: &'static str;

    fn from_byte(value: u8) -> Self;
    fn to_byte(self) -> u8;
    fn is_recognized(self) -> bool;
}

/// Declares a byte-coded enumeration with an `Unrecognized(u8)` fallback.
///
/// Known variants serialize as their upper-case names, unknown bytes as the
/// bare integer. Deserializing a bare integer goes through `from_byte`, so
/// `1` and `"CC"` yield the same variant. Equality and hashing compare wire
/// bytes: `Unrecognized(v)` equals the named variant coded as `v`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Byte outside the known variant set, kept verbatim.
            #[serde(untagged)]
            Unrecognized(u8),
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.to_byte() == other.to_byte()
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.to_byte().hash(state);
            }
        }

        const _: () = {
            #[derive(Deserialize)]
            #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
            enum Repr {
                $($variant,)+
                #[serde(untagged)]
                Raw(u8),
            }

            impl<'de> Deserialize<'de> for $name {
                fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    Ok(match Repr::deserialize(deserializer)? {
                        $(Repr::$variant => $name::$variant,)+
                        Repr::Raw(value) => <$name as WireEnum>::from_byte(value),
                    })
                }
            }
        };

        impl WireEnum for $name {
            const KIND: &'static str = $kind;

            fn from_byte(value: u8) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    other => Self::Unrecognized(other),
                }
            }

            fn to_byte(self) -> u8 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Unrecognized(value) => value,
                }
            }

            fn is_recognized(self) -> bool {
                !matches!(Self::from_byte(self.to_byte()), Self::Unrecognized(_))
            }
        }
    };
}

wire_enum! {
    /// DAW protocol the transport section speaks.
    ControlMode: "control mode" {
        Cubase = 0,
        Db = 1,
        Live = 2,
        Protools = 3,
        Sonar = 4,
    }
}

wire_enum! {
    /// Who drives the button LEDs.
    LedMode: "LED mode" {
        Internal = 0,
        External = 1,
    }
}

wire_enum! {
    /// Slider and knob assignment.
    ControlAssign: "control assign type" {
        Disabled = 0,
        Cc = 1,
    }
}

wire_enum! {
    /// Button assignment. `Assign` means no message is sent.
    ButtonAssign: "button assign type" {
        Assign = 0,
        Cc = 1,
        Note = 2,
    }
}

wire_enum! {
    ButtonBehavior: "button behavior" {
        Momentary = 0,
        Toggle = 1,
    }
}

/// Decoded scene: global settings, eight channel strips, transport block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub common: Common,
    pub groups: [ControllerGroup; layout::GROUP_COUNT],
    pub transport: Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Common {
    /// Global MIDI channel, nominally 0-15.
    pub channel: u8,
    pub control_mode: ControlMode,
    pub led_mode: LedMode,
}

/// One physical channel strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerGroup {
    /// MIDI channel 0-15, or 16 to follow the global channel.
    pub channel: u8,
    pub slider: Control,
    pub knob: Control,
    pub solo: Button,
    pub mute: Button,
    pub rec: Button,
}

/// Continuous control (slider or knob).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub assign: ControlAssign,
    pub cc: u8,
    pub min: u8,
    pub max: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub assign: ButtonAssign,
    pub behavior: ButtonBehavior,
    /// CC or note number, depending on `assign`.
    pub cc: u8,
    pub off: u8,
    pub on: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transport {
    pub channel: u8,
    pub track_prev: Button,
    pub track_next: Button,
    pub cycle: Button,
    pub marker_set: Button,
    pub marker_prev: Button,
    pub marker_next: Button,
    pub rewind: Button,
    pub fast_forward: Button,
    pub stop: Button,
    pub play: Button,
    pub rec: Button,
    pub custom_daw_assign: [u8; layout::CUSTOM_DAW_ASSIGN_LEN],
}

impl Transport {
    /// Buttons in wire order, matching `layout::TRANSPORT_BUTTON_NAMES`.
    pub fn buttons(&self) -> [&Button; layout::TRANSPORT_BUTTON_NAMES.len()] {
        [
            &self.track_prev,
            &self.track_next,
            &self.cycle,
            &self.marker_set,
            &self.marker_prev,
            &self.marker_next,
            &self.rewind,
            &self.fast_forward,
            &self.stop,
            &self.play,
            &self.rec,
        ]
    }
}

impl Button {
    pub const fn momentary_cc(cc: u8) -> Self {
        Self {
            assign: ButtonAssign::Cc,
            behavior: ButtonBehavior::Momentary,
            cc,
            off: 0,
            on: 127,
        }
    }
}

impl Control {
    pub const fn cc(cc: u8) -> Self {
        Self {
            assign: ControlAssign::Cc,
            cc,
            min: 0,
            max: 127,
        }
    }
}

// Factory CC numbers.
const SLIDER_CC_BASE: u8 = 0;
const KNOB_CC_BASE: u8 = 16;
const SOLO_CC_BASE: u8 = 32;
const MUTE_CC_BASE: u8 = 48;
const REC_CC_BASE: u8 = 64;
const TRANSPORT_FACTORY_CC: [u8; 11] = [58, 59, 46, 60, 61, 62, 43, 44, 42, 41, 45];

impl ControllerGroup {
    /// Factory assignment of strip `index` (0-7).
    pub const fn factory(index: u8) -> Self {
        Self {
            channel: layout::CHANNEL_FOLLOW_GLOBAL,
            slider: Control::cc(SLIDER_CC_BASE + index),
            knob: Control::cc(KNOB_CC_BASE + index),
            solo: Button::momentary_cc(SOLO_CC_BASE + index),
            mute: Button::momentary_cc(MUTE_CC_BASE + index),
            rec: Button::momentary_cc(REC_CC_BASE + index),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        let [
            track_prev,
            track_next,
            cycle,
            marker_set,
            marker_prev,
            marker_next,
            rewind,
            fast_forward,
            stop,
            play,
            rec,
        ] = TRANSPORT_FACTORY_CC.map(Button::momentary_cc);
        Self {
            channel: layout::CHANNEL_FOLLOW_GLOBAL,
            track_prev,
            track_next,
            cycle,
            marker_set,
            marker_prev,
            marker_next,
            rewind,
            fast_forward,
            stop,
            play,
            rec,
            custom_daw_assign: [0; layout::CUSTOM_DAW_ASSIGN_LEN],
        }
    }
}

impl Default for Common {
    fn default() -> Self {
        Self {
            channel: 0,
            control_mode: ControlMode::Cubase,
            led_mode: LedMode::Internal,
        }
    }
}

impl SettingsRecord {
    /// Factory scene of the device.
    pub fn factory_default() -> Self {
        Self {
            common: Common::default(),
            groups: std::array::from_fn(|index| ControllerGroup::factory(index as u8)),
            transport: Transport::default(),
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::factory_default()
    }
}
