//! Fixed exemption rule data.
//!
//! Three kinds of tables live here: prefixes that auto-exempt `dir`
//! manifest records (runtime-state directories), the static whitelist
//! of paths and patterns present on virtually every system, and the
//! conditional tables keyed on installed packages or running processes.
//! Entries containing glob metacharacters are pattern rules, expanded
//! against the live filesystem at assembly time; everything else is an
//! exact-match literal.

/// Runtime-state directory prefixes. A `dir` manifest record under one
/// of these becomes a standing exemption: its contents churn constantly
/// and ownership is tracked at the directory level only.
pub const AUTO_EXEMPT_PREFIXES: &[&str] = &[
    "/var/cache/",
    "/var/dcc/",
    "/var/db/",
    "/var/lib/",
    "/var/log/",
    "/var/spool/",
];

/// Dynamic system files and package-manager-internal state that exist
/// regardless of what is installed and must never be reported.
pub const STATIC_RULES: &[&str] = &[
    "/etc/.etckeeper",
    "/etc/.git",
    "/etc/.gitignore",
    "/etc/.pwd.lock",
    "/etc/.updated",
    "/etc/csh.env",
    "/etc/env.d/02locale",
    "/etc/env.d/04gcc-x86_64-pc-linux-gnu",
    "/etc/env.d/05binutils",
    "/etc/env.d/99editor",
    "/etc/env.d/binutils/config-x86_64-pc-linux-gnu",
    "/etc/env.d/gcc/config-x86_64-pc-linux-gnu",
    "/etc/environment.d/10-gentoo-env.conf",
    "/etc/fstab",
    "/etc/group",
    "/etc/group-",
    "/etc/gshadow",
    "/etc/gshadow-",
    "/etc/hostname",
    "/etc/ld.so.cache",
    "/etc/ld.so.conf",
    "/etc/ld.so.conf.d/05gcc-x86_64-pc-linux-gnu.conf",
    "/etc/locale.conf",
    "/etc/localtime",
    "/etc/machine-id",
    "/etc/make.conf",
    "/etc/motd",
    "/etc/mtab",
    "/etc/passwd",
    "/etc/passwd-",
    "/etc/portage",
    "/etc/profile.csh",
    "/etc/profile.env",
    "/etc/resolv.conf",
    "/etc/shadow",
    "/etc/shadow-",
    "/etc/ssl/*",
    "/etc/subgid",
    "/etc/subgid-",
    "/etc/subuid",
    "/etc/subuid-",
    "/etc/sysctl.d/*",
    "/etc/timezone",
    "/etc/udev/hwdb.bin",
    "/etc/vconsole.conf",
    // Kernel modules and source trees
    "/lib*/modules",
    "/usr/src/linux*",
    "/usr/bin/c89",
    "/usr/bin/c99",
    // glibc autogenerated caches
    "/usr/lib*/gconv/gconv-modules.cache",
    "/usr/lib*/locale/locale-archive",
    "/usr/portage",
    "/usr/sbin/fix_libtool_files.sh",
    "/usr/share/applications/mimeinfo.cache",
    "/usr/share/binutils-data/*/*/info/dir",
    "/usr/share/fonts/.uuid",
    "/usr/share/fonts/**/.uuid",
    "/usr/share/fonts/*/*.dir",
    "/usr/share/fonts/*/*.scale",
    "/usr/share/gcc-data/*/*/info/dir",
    "/usr/share/icons/*/icon-theme.cache",
    "/usr/share/info/dir",
    "/usr/share/mime",
    "/var/.updated",
    "/var/cache/binpkgs",
    "/var/cache/distfiles",
    "/var/cache/edb",
    "/var/cache/ldconfig",
    "/var/db/pkg",
    "/var/db/repos",
    "/var/lib/misc/random-seed",
    "/var/lib/module-rebuild/moduledb",
    "/var/lib/portage",
    "/var/lock",
    "/var/log/btmp*",
    "/var/log/dmesg",
    "/var/log/emerge*",
    "/var/log/faillog",
    "/var/log/lastlog",
    "/var/log/wtmp*",
    "/var/run",
    "/var/tmp",
    "/var/www",
];

/// Per-package rules, active only when that package is installed.
pub const PACKAGE_RULES: &[(&str, &[&str])] = &[
    (
        "app-admin/logrotate",
        &["/etc/logrotate.d", "/var/lib/misc/logrotate.status"],
    ),
    ("app-admin/monit", &["/var/monit", "/var/log/monit*"]),
    (
        "app-admin/salt",
        &[
            "/etc/salt/minion.d/_schedule.conf",
            "/etc/salt/minion_id",
            "/etc/salt/pki",
            "/var/cache/salt",
            "/var/log/salt",
        ],
    ),
    ("app-admin/sudo", &["/etc/sudoers.d"]),
    ("app-admin/syslog-ng", &["/var/lib/misc/syslog-ng.persist"]),
    (
        "app-admin/system-config-printer",
        &["/usr/share/system-config-printer/*.pyc"],
    ),
    ("app-backup/bareos", &["/etc/bareos/*/*/*.conf"]),
    (
        "app-crypt/certbot",
        &[
            "/etc/letsencrypt/accounts",
            "/etc/letsencrypt/archive",
            "/etc/letsencrypt/csr/*.pem",
            "/etc/letsencrypt/keys/*.pem",
            "/etc/letsencrypt/live",
            "/etc/letsencrypt/renewal/*.conf",
            "/var/log/letsencrypt",
        ],
    ),
    ("app-editors/vim", &["/usr/share/vim/vim82/doc/tags"]),
    (
        "app-emulation/docker",
        &["/etc/docker/key.json", "/var/lib/docker"],
    ),
    (
        "app-emulation/libvirt",
        &[
            "/etc/libvirt/nwfilter/*.xml",
            "/etc/libvirt/qemu/*.xml",
            "/etc/libvirt/qemu/autostart/*.xml",
            "/etc/libvirt/qemu/networks/*.xml",
            "/etc/libvirt/qemu/networks/autostart/*.xml",
            "/etc/libvirt/storage/*.xml",
            "/etc/libvirt/storage/autostart/*.xml",
            "/var/cache/libvirt",
            "/var/lib/libvirt",
            "/var/log/libvirt",
        ],
    ),
    ("app-i18n/ibus", &["/etc/dconf/db/ibus"]),
    ("app-portage/gentoolkit", &["/var/cache/revdep-rebuild"]),
    (
        "app-text/docbook-xml-dtd",
        &["/etc/xml/catalog", "/etc/xml/docbook"],
    ),
    (
        "dev-db/mariadb",
        &["/etc/mysql/mariadb.d/*.cnf", "/var/lib/mysql", "/var/log/mysql"],
    ),
    ("dev-db/postgresql", &["/var/lib/postgresql"]),
    ("dev-lang/mono", &["/usr/share/.mono/*/Trust"]),
    (
        "dev-lang/php",
        &["/etc/php/fpm*/fpm.d/*", "/var/log/fpm", "/var/log/php-fpm.log*"],
    ),
    (
        "dev-libs/nss",
        &[
            "/usr/lib*/libfreebl3.chk",
            "/usr/lib*/libnssdbm3.chk",
            "/usr/lib*/libsoftokn3.chk",
        ],
    ),
    (
        "dev-php/PEAR-PEAR",
        &[
            "/usr/share/php/.channels",
            "/usr/share/php/.packagexml",
            "/usr/share/php/.registry",
            "/usr/share/php/.filemap",
            "/usr/share/php/.lock",
            "/usr/share/php/.depdblock",
            "/usr/share/php/.depdb",
        ],
    ),
    ("dev-util/ccache", &["/usr/lib/ccache", "/var/cache/ccache"]),
    ("mail-filter/dcc", &["/var/dcc/whiteclnt.dccw"]),
    ("mail-filter/rspamd", &["/etc/rspamd/local.d/*"]),
    (
        "mail-filter/spamassassin",
        &["/etc/mail/spamassassin/sa-update-keys"],
    ),
    ("mail-mta/exim", &["/etc/exim/exim.conf", "/var/spool/exim"]),
    ("media-gfx/graphviz", &["/usr/lib*/graphviz/config6"]),
    ("media-video/vlc", &["/usr/lib*/vlc/plugins/plugins.dat"]),
    (
        "net-analyzer/fail2ban",
        &[
            "/etc/fail2ban/action.d",
            "/etc/fail2ban/*/*.conf",
            "/var/log/fail2ban*",
        ],
    ),
    (
        "net-analyzer/librenms",
        &[
            "/opt/librenms/.composer",
            "/opt/librenms/.env",
            "/opt/librenms/.subversion",
            "/opt/librenms/bootstrap/cache",
            "/opt/librenms/cache",
            "/opt/librenms/composer.phar",
            "/opt/librenms/config.php",
            "/opt/librenms/html/js/*.js",
            "/opt/librenms/html/plugins",
            "/opt/librenms/logs",
            "/opt/librenms/rrd",
            "/opt/librenms/storage",
            "/opt/librenms/vendor",
        ],
    ),
    (
        "net-analyzer/net-snmp",
        &["/etc/snmp/snmpd.conf", "/var/log/net-snmpd.log"],
    ),
    ("net-analyzer/netdata", &["/var/cache/netdata"]),
    (
        "net-dialup/ppp",
        &[
            "/etc/ppp/chap-secrets",
            "/etc/ppp/pap-secrets",
            "/etc/ppp/ip-down.d",
            "/etc/ppp/ip-up.d",
        ],
    ),
    ("net-dns/avahi", &["/etc/avahi/services/*.service"]),
    (
        "net-dns/bind",
        &["/etc/bind/rndc.key", "/etc/bind/rndc.conf", "/var/bind"],
    ),
    (
        "net-firewall/firehol",
        &[
            "/etc/firehol/firehol.conf",
            "/etc/firehol/fireqos.conf",
            "/etc/firehol/ipsets",
            "/etc/firehol/services",
            "/var/lib/spool/firehol",
            "/var/lib/run/firehol",
            "/var/lib/run/fireqos",
            "/var/spool/firehol",
        ],
    ),
    ("net-fs/nfs-utils", &["/etc/exports.d"]),
    ("net-fs/samba", &["/etc/samba/smb.conf", "/etc/samba/smbusers"]),
    (
        "net-ftp/proftpd",
        &["/etc/proftpd/proftpd.conf", "/var/log/proftpd", "/var/log/xferlog*"],
    ),
    (
        "net-mail/dovecot",
        &["/var/lib/dovecot", "/var/log/dovecot", "/var/sieve-scripts"],
    ),
    (
        "net-misc/asterisk",
        &["/etc/asterisk/*.adsi", "/etc/asterisk/*.conf"],
    ),
    (
        "net-misc/dahdi-tools",
        &["/etc/dahdi/assigned-spans.*", "/etc/dahdi/system.*"],
    ),
    ("net-misc/dhcp", &["/etc/dhcp/dhclient-*.conf"]),
    ("net-misc/dhcpcd", &["/etc/dhcpcd.duid"]),
    ("net-misc/geoipupdate", &["/usr/share/GeoIP"]),
    ("net-misc/networkmanager", &["/var/lib/NetworkManager"]),
    ("net-misc/openssh", &["/etc/ssh/ssh_host_*"]),
    (
        "net-misc/teamviewer",
        &["/etc/teamviewer*/global.conf", "/opt/teamviewer*/rolloutfile.*"],
    ),
    (
        "net-print/cups",
        &[
            "/etc/printcap",
            "/etc/cups/classes.conf",
            "/etc/cups/ppd",
            "/etc/cups/ssl",
            "/etc/cups/printers.conf",
            "/etc/cups/subscriptions.conf",
            "/etc/cups/*.O",
            "/var/cache/cups",
        ],
    ),
    ("net-print/cups-pdf", &["/var/spool/cups-pdf"]),
    ("net-vpn/openvpn", &["/etc/openvpn", "/var/log/openvpn"]),
    ("sys-apps/accountsservice", &["/var/lib/AccountsService"]),
    ("sys-apps/lm-sensors", &["/etc/modules-load.d/lm_sensors.conf"]),
    ("sys-apps/man-db", &["/var/cache/man"]),
    ("sys-apps/sysvinit", &["/etc/inittab.d/*.tab"]),
    (
        "sys-cluster/heartbeat",
        &[
            "/etc/ha.d/authkeys",
            "/etc/ha.d/ha.cf",
            "/etc/ha.d/ha_logd.cf",
            "/etc/ha.d/haresources",
            "/etc/ha.d/resource.d/*",
        ],
    ),
    ("sys-fs/cryptsetup", &["/etc/crypttab"]),
    (
        "sys-fs/lvm2",
        &["/etc/lvm/backup", "/etc/lvm/archive", "/etc/lvm/cache/.cache"],
    ),
    (
        "sys-kernel/genkernel",
        &["/var/cache/genkernel", "/var/log/genkernel.log"],
    ),
    ("sys-libs/cracklib", &["/usr/lib*/cracklib_dict.*"]),
    ("sys-power/acpid", &["/var/log/acpid"]),
    (
        "www-apps/guacamole-client",
        &["/etc/guacamole/lib/*", "/etc/guacamole/extensions/*.jar"],
    ),
    (
        "www-servers/tomcat",
        &[
            "/etc/conf.d/tomcat-*",
            "/etc/init.d/tomcat-*",
            "/etc/runlevels/*/tomcat-*",
            "/etc/tomcat-*",
            "/var/lib/tomcat-*",
            "/var/log/tomcat-*",
        ],
    ),
];

/// Any-of groups: the rules apply when at least one package in the
/// group is installed.
pub const GROUP_RULES: &[(&[&str], &[&str])] = &[
    (
        &[
            "app-admin/metalog",
            "app-admin/newsyslog",
            "app-admin/syslog-ng",
        ],
        &["/var/log/messages*"],
    ),
    (
        &["app-office/libreoffice", "app-office/libreoffice-bin"],
        &[
            "/usr/lib*/libreoffice/program/resource/common/fonts/.uuid",
            "/usr/lib*/libreoffice/share/fonts/truetype/.uuid",
        ],
    ),
    (
        &["dev-lang/rust", "dev-lang/rust-bin"],
        &["/etc/env.d/rust/last-set"],
    ),
    (
        &["sys-process/dcron", "sys-process/cronie", "sys-process/fcron"],
        &["/etc/cron.daily", "/etc/cron.monthly", "/etc/cron.weekly"],
    ),
];

/// Process whose presence selects the init-system rule branch.
pub const INIT_PROCESS: &str = "systemd";

/// State directories owned by a running systemd.
pub const SYSTEMD_RULES: &[&str] = &[
    "/etc/systemd/network",
    "/etc/systemd/user",
    "/var/lib/systemd",
];

/// Fallback equivalents when systemd is not running. Exactly one of
/// the two branches applies, never both.
pub const NO_SYSTEMD_RULES: &[&str] = &["/etc/adjtime", "/etc/conf.d/net"];
