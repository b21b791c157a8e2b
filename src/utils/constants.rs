//! Constants used throughout the application

/// Descriptor file expected in every chain directory
pub const DESCRIPTOR_FILE_NAME: &str = "chain.json";

/// Registry directory holding test networks, never scanned
pub const EXCLUDED_CHAIN_DIRECTORY: &str = "testnets";

/// Prefix of generated playbook files, followed by the chain directory name
pub const PLAYBOOK_FILE_PREFIX: &str = "install_";

pub const PLAYBOOK_FILE_EXTENSION: &str = "yml";

pub const DEFAULT_RPC_PORT: u16 = 26657;

pub const DEFAULT_P2P_PORT: u16 = 26656;

/// Token stripped from `node_home` to obtain the node directory relative to the home directory
pub const NODE_HOME_PREFIX: &str = "$HOME/";

pub const LIBWASMVM_URL: &str =
	"https://github.com/CosmWasm/wasmvm/releases/download/v1.5.0/libwasmvm.x86_64.so";

pub const GVM_INSTALLER_URL: &str =
	"https://raw.githubusercontent.com/moovweb/gvm/master/binscripts/gvm-installer";

pub const AUTOSTAKE_SNAPSHOTS_URL: &str = "http://snapshots.autostake.com";

pub const POLKACHU_SNAPSHOTS_URL: &str = "https://snapshots.polkachu.com";

pub const POLKACHU_ADDRBOOK_URL: &str = "http://snapshots.polkachu.com/addrbook";

pub const POLKACHU_SNAPSHOT_API_URL: &str = "https://polkachu.com/api/v2/chain_snapshots/";

/// Node CLI queried by the reward estimator when none is configured
pub const DEFAULT_CHAIN_CLI: &str = "memed";

pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 30_000;

/// Validators requested per `staking validators` page
pub const VALIDATOR_PAGE_LIMIT: u32 = 100;

/// Listing more pages than this is treated as a node that never reports the last page
pub const MAX_VALIDATOR_PAGES: u32 = 50;

pub const DEFAULT_LOG_DIR: &str = "logs/";

pub const LOG_FILE_NAME: &str = "chain-node-toolkit.log";
