mod descriptor;
mod playbook;
mod rewards;

pub use descriptor::{
	ChainDescriptor, Codebase, FeeToken, Fees, GasPrice, Genesis, PeerEntry, Peers, Staking,
	StakingToken,
};
pub use playbook::{Play, PlayVars, Playbook, PlaybookProfile, Task};
pub use rewards::{
	AnnualProvisions, OutstandingRewards, PageResponse, RewardCoin, StakingPool, ValidatorInfo,
	ValidatorSet,
};
