use derive_more::derive::{AsRef, Display, From};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Display, From, AsRef, Serialize, Deserialize)]
#[serde(transparent)]
#[from(forward)]
pub struct RoomId(String);

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Display, From, AsRef, Serialize, Deserialize)]
#[serde(transparent)]
#[from(forward)]
pub struct ProfileId(String);

#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Display, From, AsRef, Serialize, Deserialize)]
#[serde(transparent)]
#[from(forward)]
pub struct FactoryId(String);
