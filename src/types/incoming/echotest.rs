//! Datatypes for the EchoTest plugin

use super::{AudioCodec, VideoCodec};
use crate::error::JanusPluginError;
use crate::{error, PluginData};
use serde::{self, Deserialize};
use std::{convert::TryFrom, path::PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EchoPluginUnnamed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audiocodec: Option<AudioCodec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videocodec: Option<VideoCodec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videoprofile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substream: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<u8>,
}

impl TryFrom<PluginData> for EchoPluginUnnamed {
    type Error = error::Error;

    fn try_from(value: PluginData) -> Result<Self, Self::Error> {
        match value {
            PluginData::EchoTest(EchoPluginData::Unnamed(e)) => Ok(e),
            _ => Err(error::Error::InvalidResponse),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "echotest")]
pub enum EchoPluginData {
    #[serde(rename = "event")]
    Event(EchoPluginDataEvent),
    #[serde(rename = "echotest")]
    Unnamed(EchoPluginUnnamed),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EchoPluginDataEvent {
    Ok { result: String },
    Error(JanusPluginError),
}

impl TryFrom<PluginData> for EchoPluginDataEvent {
    type Error = error::Error;

    fn try_from(value: PluginData) -> Result<Self, error::Error> {
        match value {
            PluginData::EchoTest(EchoPluginData::Event(e)) => Ok(e),
            _ => Err(error::Error::InvalidResponse),
        }
    }
}
