//! Playbook assembly.
//!
//! The task list is fixed per profile; descriptor values only ever appear as YAML scalars.
//! Values spliced into scripts and commands have already been restricted to inert characters
//! by validation.

use serde_yaml::{Mapping, Value};

use crate::{
	models::{Play, PlayVars, Playbook, PlaybookProfile, Task},
	services::playbook::validation::ValidatedChain,
	utils::constants::{
		AUTOSTAKE_SNAPSHOTS_URL, GVM_INSTALLER_URL, LIBWASMVM_URL, POLKACHU_ADDRBOOK_URL,
		POLKACHU_SNAPSHOTS_URL, POLKACHU_SNAPSHOT_API_URL,
	},
};

const STANDARD_PACKAGES: &[&str] = &[
	"build-essential",
	"git",
	"fail2ban",
	"ufw",
	"curl",
	"jq",
	"lz4",
	"bmon",
	"iotop",
	"htop",
	"direnv",
	"aria2",
	"sudo",
	"bison",
	"golang",
];

const MINIMAL_PACKAGES: &[&str] = &[
	"build-essential",
	"git",
	"golang",
	"fail2ban",
	"ufw",
	"curl",
	"jq",
	"lz4",
	"bmon",
	"iotop",
	"htop",
];

/// Directory the node source is checked out to on the target host
const SOURCE_DIR: &str = "~/node";

fn text(value: impl Into<String>) -> Value {
	Value::String(value.into())
}

fn mapping<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Value {
	Value::Mapping(
		entries
			.into_iter()
			.map(|(key, value)| (text(key), value))
			.collect::<Mapping>(),
	)
}

fn list(items: impl IntoIterator<Item = Value>) -> Value {
	Value::Sequence(items.into_iter().collect())
}

fn yes() -> Value {
	Value::Bool(true)
}

/// A `lineinfile` pattern/replacement pair
fn line_patch(pattern: &str, line: String) -> Value {
	mapping([("pattern", text(pattern)), ("line", text(line))])
}

/// Assembles the playbook for a validated chain.
pub fn build_playbook(chain: &ValidatedChain, profile: PlaybookProfile) -> Playbook {
	let mut tasks = security_tasks();
	tasks.push(install_packages(profile));
	tasks.push(Task::new(
		"Clone node repository",
		"git",
		mapping([
			("repo", text(&chain.git_repo)),
			("dest", text(SOURCE_DIR)),
			("version", text(&chain.recommended_version)),
			("force", yes()),
		]),
	));
	match profile {
		PlaybookProfile::Standard => tasks.extend(build_from_source_tasks(chain)),
		PlaybookProfile::Minimal => tasks.extend(make_install_tasks()),
	}
	tasks.extend(initialization_tasks(chain, profile));
	if profile == PlaybookProfile::Standard {
		tasks.extend(address_book_tasks(chain));
	}
	tasks.extend(configuration_tasks(chain));
	tasks.extend(service_tasks(chain, profile));
	tasks.extend(cleanup_tasks());

	let vars = match profile {
		PlaybookProfile::Standard => PlayVars::new()
			.with("low_gas_price", chain.low_gas_price.clone().unwrap_or_default())
			.with("node_dir", chain.node_dir.clone().unwrap_or_default())
			.with("seeds", &chain.seeds)
			.with("peers", &chain.persistent_peers)
			.with("snapshot_url", POLKACHU_SNAPSHOT_API_URL),
		PlaybookProfile::Minimal => PlayVars::new()
			.with("node_moniker", &chain.pretty_name)
			.with("seeds", &chain.seeds)
			.with("peers", &chain.persistent_peers),
	}
	.with("rpc_port", chain.rpc_port.to_string())
	.with("p2p_port", chain.p2p_port.to_string());

	Playbook {
		plays: vec![Play {
			name: format!("Setup {} Node", chain.pretty_name),
			hosts: "all".to_string(),
			become_root: match profile {
				PlaybookProfile::Standard => None,
				PlaybookProfile::Minimal => Some(true),
			},
			vars,
			tasks,
		}],
	}
}

fn security_tasks() -> Vec<Task> {
	vec![
		Task::new(
			"Generate SSH keys",
			"command",
			mapping([
				("cmd", text(r#"ssh-keygen -t rsa -f ~/.ssh/id_rsa -N """#)),
				("creates", text("~/.ssh/id_rsa")),
			]),
		),
		Task::new("Display public SSH key", "command", text("cat ~/.ssh/id_rsa.pub"))
			.keyword("register", text("public_key"))
			.keyword("changed_when", Value::Bool(false)),
		Task::unnamed("debug", mapping([("var", text("public_key.stdout"))])),
		Task::new(
			"Upgrade system packages",
			"apt",
			mapping([("update_cache", yes()), ("upgrade", text("yes"))]),
		),
	]
}

fn install_packages(profile: PlaybookProfile) -> Task {
	let packages = match profile {
		PlaybookProfile::Standard => STANDARD_PACKAGES,
		PlaybookProfile::Minimal => MINIMAL_PACKAGES,
	};
	Task::new(
		"Install necessary packages",
		"apt",
		mapping([
			("name", list(packages.iter().map(|p| text(*p)))),
			("state", text("present")),
		]),
	)
}

/// Builds the daemon with the Go release pinned in the node's `go.mod`
fn build_from_source_tasks(chain: &ValidatedChain) -> Vec<Task> {
	let install_go = format!(
		"GOVERSION=$(egrep '^go [0-9]+\\.[0-9]+' ~/node/go.mod | egrep -o '[0-9]+\\.[0-9]+')\n\
		 echo $GOVERSION > ~/node/release.txt\n\
		 curl -s -S -L {} | bash -\n\
		 source ~/.gvm/scripts/gvm && gvm install \"go$GOVERSION\" && gvm use \"go$GOVERSION\"\n",
		GVM_INSTALLER_URL
	);
	let found_when = text("found_daemon.matched > 0");
	let found_loop = text("{{ found_daemon.files }}");

	vec![
		Task::new(
			"Download and install libwasmvm.x86_64.so",
			"block",
			list([
				mapping([
					("name", text("Download libwasmvm.x86_64.so from GitHub")),
					(
						"get_url",
						mapping([
							("url", text(LIBWASMVM_URL)),
							("dest", text("/usr/local/lib/libwasmvm.x86_64.so")),
							("mode", text("0755")),
						]),
					),
				]),
				mapping([
					(
						"name",
						text("Execute ldconfig to refresh shared library cache"),
					),
					("command", text("ldconfig")),
				]),
			]),
		)
		.keyword("become", yes()),
		Task::new(
			"Install the Go version required by the node",
			"shell",
			text(install_go),
		)
		.keyword("args", mapping([("executable", text("/bin/bash"))])),
		Task::new(
			"Compile the node with the required Go version",
			"shell",
			text(
				"source ~/.gvm/scripts/gvm && gvm use \"go$(cat release.txt)\" && export GOPATH=~/go && make build",
			),
		)
		.keyword(
			"args",
			mapping([
				("executable", text("/bin/bash")),
				("chdir", text(SOURCE_DIR)),
			]),
		)
		.keyword("environment", mapping([("GOPATH", text("~/go"))])),
		Task::new(
			"Locate the compiled daemon binary",
			"find",
			mapping([
				("paths", text("/root/node")),
				("patterns", text(&chain.daemon_name)),
				("recurse", yes()),
				("file_type", text("file")),
			]),
		)
		.keyword("register", text("found_daemon")),
		Task::new(
			"Debug the location of the compiled daemon binary",
			"debug",
			mapping([(
				"msg",
				text("The compiled daemon binary is located at: {{ item.path }}"),
			)]),
		)
		.keyword("loop", found_loop.clone())
		.keyword("when", found_when.clone()),
		Task::new(
			"Copy the compiled daemon binary to /usr/local/bin/",
			"copy",
			mapping([
				("src", text("{{ item.path }}")),
				("dest", text(format!("/usr/local/bin/{}", chain.daemon_name))),
				("mode", text("0755")),
				("remote_src", yes()),
			]),
		)
		.keyword("loop", found_loop)
		.keyword("when", found_when),
	]
}

fn make_install_tasks() -> Vec<Task> {
	vec![
		Task::new(
			"Install node",
			"command",
			mapping([("cmd", text("make install")), ("chdir", text(SOURCE_DIR))]),
		),
		Task::new(
			"Copy compiled binaries to /usr/local/bin/",
			"shell",
			text("cp /root/go/bin/* /usr/local/bin/"),
		),
	]
}

fn initialization_tasks(chain: &ValidatedChain, profile: PlaybookProfile) -> Vec<Task> {
	let genesis_path = format!("{}/config/genesis.json", chain.node_home);
	let moniker = match profile {
		PlaybookProfile::Standard => chain.chain_name.clone(),
		PlaybookProfile::Minimal => "{{ node_moniker | quote }}".to_string(),
	};

	vec![
		Task::new(
			"Check if genesis.json exists",
			"stat",
			mapping([("path", text(&genesis_path))]),
		)
		.keyword("register", text("genesis_stat")),
		Task::new(
			format!("Configure {}", chain.pretty_name),
			"command",
			text(format!(
				"{} config chain-id {}",
				chain.daemon_name, chain.chain_id
			)),
		)
		.keyword("ignore_errors", yes()),
		Task::new(
			format!("Initialize {}", chain.pretty_name),
			"command",
			mapping([(
				"cmd",
				text(format!(
					"{} init {} --chain-id {}",
					chain.daemon_name, moniker, chain.chain_id
				)),
			)]),
		)
		.keyword("when", text("not genesis_stat.stat.exists")),
		Task::new(
			"Download genesis.json",
			"get_url",
			mapping([
				("url", text(&chain.genesis_url)),
				("dest", text(genesis_path)),
				("force", yes()),
			]),
		),
	]
}

fn address_book_tasks(chain: &ValidatedChain) -> Vec<Task> {
	let dest = format!("{}/config/addrbook.json", chain.node_home);
	let sources = [
		(
			"Autostake",
			format!(
				"{}/{}/addrbook.json",
				AUTOSTAKE_SNAPSHOTS_URL, chain.chain_id
			),
		),
		(
			"Polkachu",
			format!("{}/{}/addrbook.json", POLKACHU_ADDRBOOK_URL, chain.chain_name),
		),
	];

	sources
		.into_iter()
		.map(|(provider, url)| {
			Task::new(
				format!("Try to download Address Book from {}", provider),
				"get_url",
				mapping([
					("url", text(url)),
					("dest", text(&dest)),
					("force", yes()),
				]),
			)
			.keyword("ignore_errors", yes())
		})
		.collect()
}

/// Patches `config.toml` and `app.toml` with peers, pruning and gas settings
fn configuration_tasks(chain: &ValidatedChain) -> Vec<Task> {
	let pruning = || {
		vec![
			line_patch("^pruning =.*", r#"pruning = "custom""#.to_string()),
			line_patch(
				"^pruning-keep-recent =.*",
				r#"pruning-keep-recent = "100""#.to_string(),
			),
			line_patch(
				"^pruning-interval =.*",
				r#"pruning-interval = "10""#.to_string(),
			),
		]
	};
	let gas_price = chain.minimum_gas_price.as_ref().map(|price| {
		line_patch(
			"^minimum-gas-prices =.*",
			format!(r#"minimum-gas-prices = "{}""#, price),
		)
	});

	let mut config_patches = vec![
		line_patch("^seeds =.*", format!(r#"seeds = "{}""#, chain.seeds)),
		line_patch(
			"^persistent_peers =.*",
			format!(r#"persistent_peers = "{}""#, chain.persistent_peers),
		),
	];
	config_patches.extend(pruning());
	config_patches.extend(gas_price.clone());
	config_patches.push(line_patch("^prometheus =.*", "prometheus = true".to_string()));

	let mut app_patches = pruning();
	app_patches.extend(gas_price);

	let patch_task = |name: String, file: &str, patches: Vec<Value>| {
		Task::new(
			name,
			"lineinfile",
			mapping([
				(
					"path",
					text(format!("{}/config/{}", chain.node_home, file)),
				),
				("regexp", text("{{ item.pattern }}")),
				("line", text("{{ item.line }}")),
			]),
		)
		.keyword("with_items", list(patches))
	};

	vec![
		patch_task(
			format!(
				"Update {} config with seeds, peers, and other configurations",
				chain.pretty_name
			),
			"config.toml",
			config_patches,
		),
		patch_task(
			format!(
				"Update {} app.toml with pruning and other configurations",
				chain.pretty_name
			),
			"app.toml",
			app_patches,
		),
	]
}

fn systemd_unit(chain: &ValidatedChain) -> String {
	format!(
		"[Unit]\n\
		 Description={} Node\n\
		 After=network-online.target\n\
		 [Service]\n\
		 User=root\n\
		 ExecStart=/usr/local/bin/{} start --x-crisis-skip-assert-invariants\n\
		 Restart=on-failure\n\
		 RestartSec=10\n\
		 [Install]\n\
		 WantedBy=multi-user.target\n",
		chain.pretty_name, chain.daemon_name
	)
}

/// Snapshot download scripts, each best effort
fn snapshot_tasks(chain: &ValidatedChain) -> Vec<Task> {
	let autostake = format!(
		"set -e\n\
		 SNAP_URL=\"{base}/{chain_id}/\"\n\
		 SNAP_NAME=$(curl -s \"${{SNAP_URL}}\" | egrep -o \">{chain_id}.*.tar.lz4\" | tr -d \">\" | tail -1)\n\
		 aria2c --out=snapshot.tar.lz4 --check-certificate=false --max-tries=99 --retry-wait=5 --always-resume=true --max-file-not-found=99 --conditional-get=true -s 16 -x 16 -k 1M -j 1 \"${{SNAP_URL}}${{SNAP_NAME}}\"\n\
		 lz4 -c -d snapshot.tar.lz4 | tar -x -C {home}\n\
		 rm -rf snapshot.tar.lz4\n",
		base = AUTOSTAKE_SNAPSHOTS_URL,
		chain_id = chain.chain_id,
		home = chain.node_home,
	);
	let polkachu = format!(
		"SNAPSHOTS_DIR_URL=\"{base}/snapshots/\"\n\
		 USER_AGENT=\"Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36\"\n\
		 LATEST=$(curl -s -A \"$USER_AGENT\" \"$SNAPSHOTS_DIR_URL\" | grep -oP '{chain_name}.*?\\.lz4' | cut -d'/' -f2)\n\
		 SNAPSHOT_URL=\"{base}/snapshots/{chain_name}/\"\n\
		 aria2c --out=snapshot.tar.lz4 --check-certificate=false --max-tries=99 --retry-wait=5 --always-resume=true --max-file-not-found=99 --conditional-get=true -s 16 -x 16 -k 1M -j 1 \"${{SNAPSHOT_URL}}${{LATEST}}\"\n\
		 lz4 -c -d snapshot.tar.lz4 | tar -x -C {home}\n\
		 rm -rf snapshot.tar.lz4\n",
		base = POLKACHU_SNAPSHOTS_URL,
		chain_name = chain.chain_name,
		home = chain.node_home,
	);

	vec![
		Task::new(
			"Download and extract the latest snapshot from Autostake",
			"shell",
			text(autostake),
		)
		.keyword("ignore_errors", yes()),
		Task::new(
			"Download and extract the latest snapshot from Polkachu",
			"shell",
			text(polkachu),
		)
		.keyword("ignore_errors", yes()),
	]
}

fn service_tasks(chain: &ValidatedChain, profile: PlaybookProfile) -> Vec<Task> {
	let unit_path = format!("/etc/systemd/system/{}.service", chain.chain_name);
	let create_name = format!("Create {} service", chain.pretty_name);
	let mut tasks = Vec::new();

	match profile {
		PlaybookProfile::Standard => {
			tasks.push(
				Task::new(
					format!("Stop systemd {}", chain.pretty_name),
					"systemd",
					mapping([
						("state", text("stopped")),
						("name", text(&chain.chain_name)),
					]),
				)
				.keyword("ignore_errors", yes()),
			);
			tasks.push(
				Task::new(
					"Cleanup systemd service",
					"file",
					mapping([("path", text(&unit_path)), ("state", text("absent"))]),
				)
				.keyword("ignore_errors", yes()),
			);
			tasks.push(Task::new(
				create_name,
				"blockinfile",
				mapping([
					("path", text(&unit_path)),
					("block", text(systemd_unit(chain))),
					("create", yes()),
				]),
			));
			tasks.extend(snapshot_tasks(chain));
		}
		PlaybookProfile::Minimal => {
			tasks.push(Task::new(
				create_name,
				"copy",
				mapping([
					("dest", text(&unit_path)),
					("content", text(systemd_unit(chain))),
					("mode", text("0644")),
				]),
			));
		}
	}

	tasks.push(Task::new(
		format!("Reload systemd and start {}", chain.pretty_name),
		"systemd",
		mapping([
			("daemon_reload", yes()),
			("enabled", yes()),
			("state", text("started")),
			("name", text(&chain.chain_name)),
		]),
	));
	tasks
}

fn cleanup_tasks() -> Vec<Task> {
	vec![
		Task::new(
			"Cleanup leftover go directory",
			"file",
			mapping([("path", text("/root/go")), ("state", text("absent"))]),
		),
		Task::new(
			"Cleanup leftover node directory",
			"file",
			mapping([("path", text(SOURCE_DIR)), ("state", text("absent"))]),
		),
	]
}
