use super::error::RecordError;
use super::layout;
use super::options::DecodeOptions;
use super::reader::RecordReader;
use super::types::{Button, Common, Control, ControllerGroup, SettingsRecord, Transport};
use super::writer::RecordWriter;

/// A record together with the findings the decode options chose to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub record: SettingsRecord,
    pub issues: Vec<RecordError>,
}

/// Field layout of one record type, declared once for both directions.
trait WireRecord: Sized {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError>;
    fn write(&self, writer: &mut RecordWriter);
}

/// Decode a natural payload with the default options.
///
/// # Errors
/// Returns `RecordError::Length` unless `natural` is exactly
/// `layout::NATURAL_LEN` bytes, and `RecordError::ReservedByte` for the first
/// nonzero reserved byte. Unknown enumeration bytes are kept as
/// `Unrecognized` variants.
pub fn decode_record(natural: &[u8]) -> Result<SettingsRecord, RecordError> {
    decode_record_with(natural, &DecodeOptions::default()).map(|decoded| decoded.record)
}

pub fn decode_record_with(
    natural: &[u8],
    options: &DecodeOptions,
) -> Result<Decoded, RecordError> {
    let mut reader = RecordReader::new(natural, *options);
    reader.require_exact_len(layout::NATURAL_LEN)?;
    let record = SettingsRecord::read(&mut reader)?;
    let issues = reader.into_issues();
    tracing::debug!(issues = issues.len(), "scene record decoded");
    Ok(Decoded { record, issues })
}

/// Encode a record into its `layout::NATURAL_LEN`-byte natural payload.
///
/// # Examples
/// ```
/// use nanokontrol_core::protocols::record::{decode_record, encode_record, SettingsRecord};
///
/// let record = SettingsRecord::factory_default();
/// let natural = encode_record(&record);
/// assert_eq!(natural.len(), 339);
/// assert_eq!(decode_record(&natural).unwrap(), record);
/// ```
pub fn encode_record(record: &SettingsRecord) -> Vec<u8> {
    let mut writer = RecordWriter::with_capacity(layout::NATURAL_LEN);
    record.write(&mut writer);
    let natural = writer.into_inner();
    debug_assert_eq!(natural.len(), layout::NATURAL_LEN);
    natural
}

impl SettingsRecord {
    /// Reject the first enumeration byte outside the known variant set.
    ///
    /// Callers that act on the settings (rather than display or re-encode
    /// them) use this to refuse `Unrecognized` values.
    pub fn require_known(&self) -> Result<(), RecordError> {
        decode_record_with(&encode_record(self), &DecodeOptions::strict()).map(|_| ())
    }
}

impl WireRecord for SettingsRecord {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let common = reader.scoped("common", Common::read)?;
        let mut groups = [ControllerGroup::factory(0); layout::GROUP_COUNT];
        for (index, group) in groups.iter_mut().enumerate() {
            *group = reader.scoped(format!("groups[{index}]"), ControllerGroup::read)?;
        }
        let transport = reader.scoped("transport", Transport::read)?;
        Ok(Self {
            common,
            groups,
            transport,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        self.common.write(writer);
        for group in &self.groups {
            group.write(writer);
        }
        self.transport.write(writer);
    }
}

impl WireRecord for Common {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            channel: reader.read_u8()?,
            control_mode: reader.read_enum("control_mode")?,
            led_mode: reader.read_enum("led_mode")?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.write_u8(self.channel);
        writer.write_enum(self.control_mode);
        writer.write_enum(self.led_mode);
    }
}

impl WireRecord for ControllerGroup {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        Ok(Self {
            channel: reader.read_u8()?,
            slider: reader.scoped("slider", Control::read)?,
            knob: reader.scoped("knob", Control::read)?,
            solo: reader.scoped("solo", Button::read)?,
            mute: reader.scoped("mute", Button::read)?,
            rec: reader.scoped("rec", Button::read)?,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.write_u8(self.channel);
        self.slider.write(writer);
        self.knob.write(writer);
        self.solo.write(writer);
        self.mute.write(writer);
        self.rec.write(writer);
    }
}

impl WireRecord for Control {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let assign = reader.read_enum("assign")?;
        reader.expect_reserved("reserved[0]")?;
        let cc = reader.read_u8()?;
        let min = reader.read_u8()?;
        let max = reader.read_u8()?;
        reader.expect_reserved("reserved[1]")?;
        Ok(Self {
            assign,
            cc,
            min,
            max,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.write_enum(self.assign);
        writer.write_reserved(1);
        writer.write_u8(self.cc);
        writer.write_u8(self.min);
        writer.write_u8(self.max);
        writer.write_reserved(1);
    }
}

impl WireRecord for Button {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let button = Self {
            assign: reader.read_enum("assign")?,
            behavior: reader.read_enum("behavior")?,
            cc: reader.read_u8()?,
            off: reader.read_u8()?,
            on: reader.read_u8()?,
        };
        reader.expect_reserved("reserved")?;
        Ok(button)
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.write_enum(self.assign);
        writer.write_enum(self.behavior);
        writer.write_u8(self.cc);
        writer.write_u8(self.off);
        writer.write_u8(self.on);
        writer.write_reserved(1);
    }
}

impl WireRecord for Transport {
    fn read(reader: &mut RecordReader<'_>) -> Result<Self, RecordError> {
        let channel = reader.read_u8()?;
        let mut buttons = [Button::momentary_cc(0); layout::TRANSPORT_BUTTON_NAMES.len()];
        for (button, name) in buttons.iter_mut().zip(layout::TRANSPORT_BUTTON_NAMES) {
            *button = reader.scoped(name, Button::read)?;
        }
        let custom_daw_assign = reader.read_array()?;
        reader.expect_reserved_run("reserved", layout::TRANSPORT_RESERVED_LEN)?;

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
        ] = buttons;
        Ok(Self {
            channel,
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
            custom_daw_assign,
        })
    }

    fn write(&self, writer: &mut RecordWriter) {
        writer.write_u8(self.channel);
        for button in self.buttons() {
            button.write(writer);
        }
        writer.write_bytes(&self.custom_daw_assign);
        writer.write_reserved(layout::TRANSPORT_RESERVED_LEN);
    }
}
