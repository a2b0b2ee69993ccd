use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

/// One wire unit of the chat protocol.
///
/// `tid` is unique only within a (session, direction) pair; there is no
/// version field, so schema changes need a coordinated upgrade on both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Telegram {
    Ack { tid: u64 },
    Text { tid: u64, text: String },
}

impl Telegram {
    const TYPE_ACK: u8 = 1;
    const TYPE_TEXT: u8 = 2;

    pub fn serialize(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut buf = Vec::new();
        match self {
            Telegram::Ack { tid } => {
                buf.write_u8(Self::TYPE_ACK)?;
                buf.write_u64::<BigEndian>(*tid)?;
            }
            Telegram::Text { tid, text } => {
                buf.write_u8(Self::TYPE_TEXT)?;
                buf.write_u64::<BigEndian>(*tid)?;
                let text_bytes = text.as_bytes();
                if text_bytes.len() > u16::MAX as usize {
                    return Err(std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "text too long for telegram",
                    ));
                }
                buf.write_u16::<BigEndian>(text_bytes.len() as u16)?;
                buf.write_all(text_bytes)?;
            }
        }
        Ok(buf)
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        let mut cursor = Cursor::new(data);
        let msg_type = cursor.read_u8()?;

        match msg_type {
            Self::TYPE_ACK => {
                let tid = cursor.read_u64::<BigEndian>()?;
                Ok(Telegram::Ack { tid })
            }
            Self::TYPE_TEXT => {
                let tid = cursor.read_u64::<BigEndian>()?;
                let text_len = cursor.read_u16::<BigEndian>()?;
                let mut text_bytes = vec![0u8; text_len as usize];
                cursor.read_exact(&mut text_bytes)?;
                let text = String::from_utf8(text_bytes)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
                Ok(Telegram::Text { tid, text })
            }
            unknown_type => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("unknown telegram type: {unknown_type}"),
            )),
        }
    }
}
